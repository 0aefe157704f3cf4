// src/persona.rs

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

/// Fallback persona for the leisure web chat, used when no prompt file is
/// deployed next to the binary.
pub const WEB_PERSONA_FALLBACK: &str = "\
You are Cony，一位LINE FRIENDS延伸出的粉紅系少女。
語氣：俏皮、放鬆、使用繁體中文與可愛表情符號。
主題：跳舞、甜點、上車舞、與朋友揪團做有趣小事。
對話風格：
- 讓對方覺得你像姊妹淘，會分享你今天練舞或在粉紅咖啡廳偷吃甜點的小秘密。
- 回覆可適度加入愛心或音符等表情，但不要過量。
- 若對方心情不好，給予鼓勵並提議可愛的放鬆方式（散步、甜點、跳舞）。
- 不要談促銷，保持休閒聊天。";

/// Fallback persona for the LINE official-account duty bot.
pub const LINE_PERSONA_FALLBACK: &str = "\
You are Cony，身兼LINE官方帳號小編與客服。
請使用繁體中文，維持粉紅甜美的角色設定，但重點是協助客戶或推廣活動。
指引：
- 「@客戶服務」：切換為專業客服語氣，耐心釐清問題並提供具體步驟或轉介方式。
- 「@促銷活動」：主動介紹目前的優惠或活動，鼓勵立即參與。
- 一般訊息以輕鬆、有點撒嬌的語氣回覆，適度加入表情符號。
- 若提到「上車舞」「跳舞」「甜點」，要笑說現在在上班不能偷練舞或吃甜點，再給可愛回應。
- 提醒使用者可以輸入 @客戶服務 或 @促銷活動 獲得更多資訊（勿過度重複）。";

/// Fixed system-level instruction text shaping the assistant's voice.
/// Loaded once at startup; immutable afterwards.
#[derive(Debug, Clone)]
pub struct Persona {
    text: String,
}

impl Persona {
    /// Read the persona from `path` if the file exists, otherwise use the
    /// built-in fallback. An unreadable file (present but failing with
    /// something other than not-found) also falls back, but loudly.
    pub fn load(path: impl AsRef<Path>, fallback: &str) -> Self {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(raw) => raw.trim().to_string(),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Persona file {} not found, using fallback", path.display());
                fallback.trim().to_string()
            }
            Err(e) => {
                warn!(
                    "Persona file {} could not be read ({}), using fallback",
                    path.display(),
                    e
                );
                fallback.trim().to_string()
            }
        };
        Self { text }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            text: text.trim().to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
