//! HTTP status and Discord JSON error codes.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Splits a `CamelCase` identifier into space-separated words.
fn title_words(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut title = String::with_capacity(ident.len() + 8);
    for (i, &ch) in chars.iter().enumerate() {
        if i > 0 && ch.is_ascii_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
            if !prev.is_ascii_uppercase() || next_is_lower {
                title.push(' ');
            }
        }
        title.push(ch);
    }
    title
}

macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident: $repr:ty {
            $($variant:ident = $value:literal,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[allow(missing_docs)]
        $vis enum $name {
            $($variant,)*
            /// A code this crate does not know.
            Other($repr),
        }

        impl $name {
            /// Name of the code in title case, or `None` if unknown.
            #[must_use]
            pub fn title(self) -> Option<String> {
                match self {
                    $(Self::$variant => Some(title_words(stringify!($variant))),)*
                    Self::Other(_) => None,
                }
            }

            #[must_use]
            pub const fn is_known(self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl From<$repr> for $name {
            fn from(value: $repr) -> Self {
                match value {
                    $($value => Self::$variant,)*
                    other => Self::Other(other),
                }
            }
        }

        impl From<$name> for $repr {
            fn from(code: $name) -> Self {
                match code {
                    $($name::$variant => $value,)*
                    $name::Other(other) => other,
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                <$repr>::from(*self).serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                <$repr>::deserialize(deserializer).map(Self::from)
            }
        }
    };
}

coded_enum! {
    /// HTTP status codes the REST API answers with.
    pub enum HttpStatus: u16 {
        Ok = 200,
        Created = 201,
        NoContent = 204,
        NotModified = 304,
        BadRequest = 400,
        Unauthorized = 401,
        Forbidden = 403,
        NotFound = 404,
        MethodNotAllowed = 405,
        TooManyRequests = 429,
        InternalServerError = 500,
        NotImplemented = 501,
        GatewayUnavailable = 502,
        ServiceUnavailable = 503,
        GatewayTimeout = 504,
    }
}

impl HttpStatus {
    #[must_use]
    pub fn from_u16(value: u16) -> Self {
        Self::from(value)
    }

    #[must_use]
    pub fn as_u16(self) -> u16 {
        self.into()
    }

    #[must_use]
    pub fn is_success(self) -> bool {
        (200..300).contains(&self.as_u16())
    }

    #[must_use]
    pub fn is_client_error(self) -> bool {
        (400..500).contains(&self.as_u16())
    }

    #[must_use]
    pub fn is_server_error(self) -> bool {
        (500..600).contains(&self.as_u16())
    }

    /// Human readable reason, e.g. `Internal Server Error`.
    #[must_use]
    pub fn reason(self) -> String {
        self.title()
            .unwrap_or_else(|| format!("HTTP {}", self.as_u16()))
    }
}

impl fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason())
    }
}

coded_enum! {
    /// Error codes Discord puts in the `code` field of REST error bodies.
    pub enum JsonErrorCode: u32 {
        UnknownAccount = 10001,
        UnknownApplication = 10002,
        UnknownChannel = 10003,
        UnknownGuild = 10004,
        UnknownIntegration = 10005,
        UnknownInvite = 10006,
        UnknownMember = 10007,
        UnknownMessage = 10008,
        UnknownOverwrite = 10009,
        UnknownProvider = 10010,
        UnknownRole = 10011,
        UnknownToken = 10012,
        UnknownUser = 10013,
        UnknownEmoji = 10014,
        UnknownWebhook = 10015,
        UsersOnly = 20001,
        BotsOnly = 20002,
        MaxGuildsReached = 30001,
        MaxFriendsReached = 30002,
        MaxPinsReached = 30003,
        MaxGuildRolesReached = 30005,
        MaxReactionsReached = 30010,
        MaxGuildChannelsReached = 30013,
        Unauthorized = 40001,
        MissingAccess = 50001,
        InvalidAccountType = 50002,
        CannotExecuteActionOnDmChannel = 50003,
        WidgetDisabled = 50004,
        CannotEditAMessageAuthoredByAnotherUser = 50005,
        CannotSendAnEmptyMessage = 50006,
        CannotSendMessagesToThisUser = 50007,
        CannotSendMessagesInVoiceChannel = 50008,
        ChannelVerificationTooHigh = 50009,
        Oauth2ApplicationDoesNotHaveABot = 50010,
        Oauth2ApplicationLimitReached = 50011,
        InvalidOauth2State = 50012,
        MissingPermissions = 50013,
        InvalidAuthenticationToken = 50014,
        NoteIsTooLong = 50015,
        InvalidNumberOfMessagesToDelete = 50016,
        CannotPinAMessageInADifferentChannel = 50019,
        InvalidInvite = 50020,
        CannotExecuteActionOnSystemMessage = 50021,
        InvalidOauth2Token = 50025,
        MessageProvidedWasTooOldToBulkDelete = 50034,
        InvalidFormBody = 50035,
        AcceptedInviteToGuildBotIsNotIn = 50036,
        InvalidApiVersion = 50041,
        ReactionBlocked = 90001,
    }
}

impl JsonErrorCode {
    #[must_use]
    pub fn from_u32(value: u32) -> Self {
        Self::from(value)
    }

    #[must_use]
    pub fn as_u32(self) -> u32 {
        self.into()
    }

    /// Returns true for the `10xxx` family: the target does not exist.
    #[must_use]
    pub fn is_unknown_entity(self) -> bool {
        (10_000..20_000).contains(&self.as_u32())
    }

    /// Returns true for the `30xxx` family: a per-account or per-guild limit.
    #[must_use]
    pub fn is_limit_reached(self) -> bool {
        (30_000..40_000).contains(&self.as_u32())
    }
}

impl fmt::Display for JsonErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.title() {
            Some(title) => write!(f, "{title} ({})", self.as_u32()),
            None => write!(f, "unknown error code ({})", self.as_u32()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(500, "Internal Server Error" ; "internal server error")]
    #[test_case(502, "Gateway Unavailable" ; "gateway unavailable")]
    #[test_case(429, "Too Many Requests" ; "too many requests")]
    #[test_case(418, "HTTP 418" ; "unknown status")]
    fn test_status_reason(code: u16, reason: &str) {
        assert_eq!(HttpStatus::from_u16(code).reason(), reason);
    }

    #[test]
    fn test_status_classes() {
        assert!(HttpStatus::NoContent.is_success());
        assert!(HttpStatus::NotFound.is_client_error());
        assert!(HttpStatus::from_u16(599).is_server_error());
        assert_eq!(HttpStatus::from_u16(599), HttpStatus::Other(599));
        assert_eq!(HttpStatus::Forbidden.to_string(), "403 Forbidden");
    }

    #[test]
    fn test_json_error_code() {
        let code = JsonErrorCode::from_u32(50013);
        assert_eq!(code, JsonErrorCode::MissingPermissions);
        assert_eq!(code.to_string(), "Missing Permissions (50013)");
        assert!(JsonErrorCode::UnknownMessage.is_unknown_entity());
        assert!(JsonErrorCode::MaxPinsReached.is_limit_reached());

        let unknown = JsonErrorCode::from_u32(12345);
        assert!(!unknown.is_known());
        assert_eq!(unknown.as_u32(), 12345);
    }

    #[test]
    fn test_title_words_splits_single_letter_words() {
        assert_eq!(
            JsonErrorCode::CannotPinAMessageInADifferentChannel.title().as_deref(),
            Some("Cannot Pin A Message In A Different Channel")
        );
        assert_eq!(
            JsonErrorCode::Oauth2ApplicationDoesNotHaveABot.title().as_deref(),
            Some("Oauth2 Application Does Not Have A Bot")
        );
    }

    #[test]
    fn test_json_error_code_serde() {
        let code: JsonErrorCode = serde_json::from_str("10008").unwrap();
        assert_eq!(code, JsonErrorCode::UnknownMessage);
        assert_eq!(serde_json::to_string(&code).unwrap(), "10008");
    }
}
