use crate::error::{BadEnvVarSnafu, NoSectionsSnafu, ParseTimezoneSnafu, RollbookResult};
use dotenvy::var;
use jiff::{Timestamp, tz::TimeZone};
use snafu::{ResultExt, ensure};
use std::{env::VarError, sync::Arc};

const SERVER_IP_VAR: &str = "ROLLBOOK_SERVER_IP";
const TIMEZONE_VAR: &str = "ROLLBOOK_TIMEZONE";
const SECTIONS_VAR: &str = "ROLLBOOK_SECTIONS";

const DEFAULT_SERVER_IP: &str = "127.0.0.1:8080";
const DEFAULT_SECTIONS: &str = "A,B,C,D";

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    server_ip: Arc<str>,
    timezone: TimeZone,
    sections: Arc<[String]>,
}

impl RuntimeConfiguration {
    pub fn new() -> RollbookResult<Self> {
        let server_ip =
            optional_env_var(SERVER_IP_VAR)?.unwrap_or_else(|| DEFAULT_SERVER_IP.to_string());

        let timezone = match optional_env_var(TIMEZONE_VAR)? {
            Some(name) => TimeZone::get(&name).context(ParseTimezoneSnafu { name })?,
            None => TimeZone::system(),
        };

        let sections = parse_sections(
            &optional_env_var(SECTIONS_VAR)?.unwrap_or_else(|| DEFAULT_SECTIONS.to_string()),
        );
        ensure!(!sections.is_empty(), NoSectionsSnafu { name: SECTIONS_VAR });

        Ok(Self::from_parts(server_ip, timezone, sections))
    }

    pub fn from_parts(
        server_ip: impl Into<Arc<str>>,
        timezone: TimeZone,
        sections: Vec<String>,
    ) -> Self {
        Self {
            server_ip: server_ip.into(),
            timezone,
            sections: sections.into(),
        }
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn display_timestamp(&self, timestamp: Timestamp) -> String {
        timestamp
            .to_zoned(self.timezone.clone())
            .strftime("%a %d/%m/%y @ %H:%M")
            .to_string()
    }
}

fn optional_env_var(name: &'static str) -> RollbookResult<Option<String>> {
    match var(name) {
        Ok(value) => Ok(Some(value)),
        Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => Ok(None),
        Err(e) => Err(e).context(BadEnvVarSnafu { name }),
    }
}

fn parse_sections(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|section| !section.is_empty())
        .map(ToString::to_string)
        .collect()
}
