use std::env;

use chess_core::datefmt::{self, Formats, DEFAULT_DATE_PATTERN, DEFAULT_TIME_PATTERN};
use chess_core::normalize_username;

use crate::clients::chess_com::DEFAULT_API_URL;

pub const DEFAULT_TEMPLATE: &str = "{{focus}} ({{focus_rating}}, {{rating_change}}) {{focus_result}} \
a {{rated}} {{game_type}} game against {{foe}} ({{foe_rating}}) on {{end_date}} at {{end_time}} \
in {{moves}} moves. {{url}}";

pub const DEFAULT_OTHER_USER_TEMPLATE: &str = "Latest game for {{focus}}: {{white}} ({{white_rating}}) \
vs {{black}} ({{black_rating}}), {{focus_result}} in {{moves}} moves. {{url}}";

#[derive(Clone, Debug)]
pub struct Config {
    /// Default lookup target
    pub username: String,
    pub template_default: String,
    /// Used when looking up someone other than `username`
    pub template_other_user: String,
    pub date_format: String,
    pub time_format: String,
    pub last_lookup_username: Option<String>,
    /// Zone that timestamps render in, minutes east of UTC
    pub utc_offset_minutes: i32,
    pub chess_com_api_url: String,
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: String::new(),
            template_default: DEFAULT_TEMPLATE.to_string(),
            template_other_user: DEFAULT_OTHER_USER_TEMPLATE.to_string(),
            date_format: DEFAULT_DATE_PATTERN.to_string(),
            time_format: DEFAULT_TIME_PATTERN.to_string(),
            last_lookup_username: None,
            utc_offset_minutes: 0,
            chess_com_api_url: DEFAULT_API_URL.to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            username: env::var("CHESS_USERNAME").unwrap_or(defaults.username),
            template_default: env::var("TEMPLATE_DEFAULT").unwrap_or(defaults.template_default),
            template_other_user: env::var("TEMPLATE_OTHER_USER")
                .unwrap_or(defaults.template_other_user),
            date_format: env::var("DATE_FORMAT").unwrap_or(defaults.date_format),
            time_format: env::var("TIME_FORMAT").unwrap_or(defaults.time_format),
            last_lookup_username: env::var("LAST_LOOKUP_USERNAME")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            utc_offset_minutes: env::var("UTC_OFFSET_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.utc_offset_minutes),
            chess_com_api_url: env::var("CHESS_COM_API_URL").unwrap_or(defaults.chess_com_api_url),
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
        }
    }

    pub fn formats(&self) -> Formats {
        Formats {
            date: self.date_format.clone(),
            time: self.time_format.clone(),
            offset: datefmt::offset_from_minutes(self.utc_offset_minutes),
        }
    }

    /// The template for a lookup of `target`: the default one for the configured
    /// user, the other-user one for anybody else.
    pub fn template_for(&self, target: &str) -> &str {
        if normalize_username(target) == normalize_username(&self.username) {
            &self.template_default
        } else {
            &self.template_other_user
        }
    }
}
