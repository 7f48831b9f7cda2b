//! Outbound reply model and the bot's canned messages.

pub const ASK_EMAIL: &str = "입력받을 이메일 주소를 입력해주세요.";
pub const CONFIRM_EMAIL: &str = "이 이메일이 맞나요?";
pub const CONFIRM_EMAIL_ALT_TEXT: &str = "이메일 주소 입력";
pub const EMAIL_CONFIRMED: &str = "확인되었습니다. 검색어를 입력해주세요.";
pub const EMAIL_REJECTED: &str = "이메일 등록을 취소했습니다.";
pub const NOT_UNDERSTOOD: &str = "무슨 말씀이신지 잘 모르겠습니다.";
pub const DIGEST_FAILED: &str = "요청을 처리하지 못했습니다. 잠시 후 다시 시도해주세요.";

/// A labeled button that sends `text` back as the user's next message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickReply {
    pub label: String,
    pub text: String,
}

/// Exactly two choices offered alongside a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickReplies {
    pub alt_text: String,
    pub choices: [QuickReply; 2],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub quick_replies: Option<QuickReplies>,
}

impl Reply {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quick_replies: None,
        }
    }

    #[must_use]
    pub fn confirm_email(affirmative: &str, negative: &str) -> Self {
        Self {
            text: CONFIRM_EMAIL.to_string(),
            quick_replies: Some(QuickReplies {
                alt_text: CONFIRM_EMAIL_ALT_TEXT.to_string(),
                choices: [
                    QuickReply {
                        label: "Yes".to_string(),
                        text: affirmative.to_string(),
                    },
                    QuickReply {
                        label: "No".to_string(),
                        text: negative.to_string(),
                    },
                ],
            }),
        }
    }

    #[must_use]
    pub fn not_understood() -> Self {
        Self::text(NOT_UNDERSTOOD)
    }

    #[must_use]
    pub fn digest_sent(query: &str, email: &str) -> Self {
        Self::text(format!("{query} 의 검색어로 {email} 의 요약본을 전송했습니다."))
    }
}
