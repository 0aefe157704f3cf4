// src/chat/router.rs

/// Instruction prefix rule: if `keyword` appears anywhere in the message,
/// the keyword is stripped and `instruction` prefixes the remainder.
/// Rules are evaluated in order; the first match wins.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    pub keyword: &'static str,
    pub instruction: &'static str,
}

const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        keyword: "@客戶服務",
        instruction: "【客服支援】請用貼心、耐心的語氣回答：",
    },
    KeywordRule {
        keyword: "@促銷活動",
        instruction: "【促銷任務】請用熱情語氣介紹最新活動：",
    },
];

/// Off-topic leisure markers, only checked when no keyword rule matched.
const LEISURE_KEYWORDS: &[&str] = &["上車舞", "跳舞", "甜點"];

const EMPTY_AFTER_STRIP: &str = "請主動詢問客戶需求並提供協助。";

const ON_DUTY_SUFFIX: &str =
    "\n（記得撒嬌抱怨一下：在上班不能偷練舞或吃甜點，但還是給對方可愛的回答）";

const GREETING_FALLBACK: &str = "幫我先跟客戶打招呼並詢問今天的服務需求。";

/// Rewrites raw user text into an instruction-prefixed prompt before it is
/// handed to the completion client. Data-driven: an ordered rule list plus
/// a secondary leisure check, so the table can be inspected and tested
/// without touching control flow. Output is always non-empty.
#[derive(Debug, Clone)]
pub struct MessageRouter {
    rules: Vec<KeywordRule>,
    leisure: Vec<&'static str>,
}

impl MessageRouter {
    pub fn new() -> Self {
        Self {
            rules: KEYWORD_RULES.to_vec(),
            leisure: LEISURE_KEYWORDS.to_vec(),
        }
    }

    pub fn prepare(&self, text: &str) -> String {
        let content = text.trim();

        for rule in &self.rules {
            if content.contains(rule.keyword) {
                let stripped = content.replace(rule.keyword, "");
                let stripped = stripped.trim();
                let body = if stripped.is_empty() {
                    EMPTY_AFTER_STRIP
                } else {
                    stripped
                };
                return format!("{}{}", rule.instruction, body);
            }
        }

        if self.leisure.iter().any(|key| content.contains(key)) {
            return format!("{content}{ON_DUTY_SUFFIX}");
        }

        if content.is_empty() {
            return GREETING_FALLBACK.to_string();
        }

        content.to_string()
    }
}

impl Default for MessageRouter {
    fn default() -> Self {
        Self::new()
    }
}
