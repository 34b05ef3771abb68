use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a valid port number, got {value:?}")]
    InvalidPort { var: &'static str, value: String },

    #[error("{var} must be a duration such as 500ms, 1.5s or 1m30s, got {value:?}")]
    InvalidDuration { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Upper bound for receiving a request body.
    pub read_timeout: Duration,
    /// Upper bound for producing a response.
    pub write_timeout: Duration,
    /// Deployment label, only used for logging.
    pub env: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, applying defaults for
    /// unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT").unwrap_or_else(|| "8080".to_string());
        let port = port
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidPort { var: "PORT", value: port.clone() })?;

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            read_timeout: duration_var(&lookup, "READ_TIMEOUT", "5s")?,
            write_timeout: duration_var(&lookup, "WRITE_TIMEOUT", "15s")?,
            env: lookup("ENV").unwrap_or_else(|| "dev".to_string()),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn duration_var<F>(lookup: &F, var: &'static str, default: &str) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(var).unwrap_or_else(|| default.to_string());
    parse_duration(&value).ok_or(ConfigError::InvalidDuration { var, value })
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Parses a Go-style duration: an optional sign followed by one or more
/// `<decimal><unit>` terms (`1m30s`, `1.5s`, `300us`), or a bare `0`.
/// Units are `ns`, `us`/`µs`, `ms`, `s`, `m`, `h`. Negative non-zero values
/// are rejected since `Duration` is unsigned.
fn parse_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    let (negative, mut rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    if rest == "0" {
        return Some(Duration::ZERO);
    }
    if rest.is_empty() {
        return None;
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (whole, tail) = split_digits(rest);
        let (fraction, tail) = match tail.strip_prefix('.') {
            Some(after_dot) => split_digits(after_dot),
            None => ("", tail),
        };
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        let scale: u128 = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => NANOS_PER_SEC,
            "m" => 60 * NANOS_PER_SEC,
            "h" => 3_600 * NANOS_PER_SEC,
            _ => return None,
        };

        if !whole.is_empty() {
            let whole: u128 = whole.parse().ok()?;
            total = total.checked_add(whole.checked_mul(scale)?)?;
        }
        let mut place = scale;
        for digit in fraction.bytes() {
            place /= 10;
            total = total.checked_add(u128::from(digit - b'0') * place)?;
        }

        // Same ceiling as Go's int64 nanosecond representation.
        if total > i64::MAX as u128 {
            return None;
        }
        rest = tail;
    }

    if negative && total != 0 {
        return None;
    }
    let secs = u64::try_from(total / NANOS_PER_SEC).ok()?;
    let nanos = u32::try_from(total % NANOS_PER_SEC).ok()?;
    Some(Duration::new(secs, nanos))
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config_from(&[]).unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.read_timeout, Duration::from_secs(5));
        assert_eq!(cfg.write_timeout, Duration::from_secs(15));
        assert_eq!(cfg.env, "dev");
        assert_eq!(cfg.addr(), "0.0.0.0:8080");
    }

    #[test]
    fn overrides_are_read() {
        let cfg = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("READ_TIMEOUT", "250ms"),
            ("WRITE_TIMEOUT", "2m"),
            ("ENV", "prod"),
        ])
        .unwrap();
        assert_eq!(cfg.addr(), "127.0.0.1:9000");
        assert_eq!(cfg.read_timeout, Duration::from_millis(250));
        assert_eq!(cfg.write_timeout, Duration::from_secs(120));
        assert_eq!(cfg.env, "prod");
    }

    #[test]
    fn invalid_port_is_reported() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidPort { var: "PORT", value: "eighty".to_string() }
        );
    }

    #[test]
    fn invalid_duration_names_the_variable() {
        let err = config_from(&[("WRITE_TIMEOUT", "15")]).unwrap_err();
        assert!(err.to_string().starts_with("WRITE_TIMEOUT"));
    }

    #[test]
    fn compound_timeout_is_accepted() {
        let cfg = config_from(&[("READ_TIMEOUT", "1m30s")]).unwrap();
        assert_eq!(cfg.read_timeout, Duration::from_secs(90));
    }

    #[test]
    fn parse_duration_units() {
        assert_eq!(parse_duration("1h"), Some(Duration::from_secs(3_600)));
        assert_eq!(parse_duration(" 30s "), Some(Duration::from_secs(30)));
        assert_eq!(parse_duration("0ms"), Some(Duration::ZERO));
        assert_eq!(parse_duration("300us"), Some(Duration::from_micros(300)));
        assert_eq!(parse_duration("300µs"), Some(Duration::from_micros(300)));
        assert_eq!(parse_duration("42ns"), Some(Duration::from_nanos(42)));
        assert_eq!(parse_duration("s"), None);
        assert_eq!(parse_duration("5d"), None);
        assert_eq!(parse_duration(""), None);
    }

    #[test]
    fn parse_duration_compound_and_fractional() {
        assert_eq!(parse_duration("1m30s"), Some(Duration::from_secs(90)));
        assert_eq!(
            parse_duration("1h2m3.5s"),
            Some(Duration::from_millis(3_723_500))
        );
        assert_eq!(parse_duration("1.5s"), Some(Duration::from_millis(1_500)));
        assert_eq!(parse_duration(".5m"), Some(Duration::from_secs(30)));
        assert_eq!(parse_duration("2.s"), Some(Duration::from_secs(2)));
        assert_eq!(parse_duration("+5s"), Some(Duration::from_secs(5)));
        assert_eq!(parse_duration("1.s5"), None);
        assert_eq!(parse_duration("."), None);
        assert_eq!(parse_duration("1s."), None);
    }

    #[test]
    fn parse_duration_bare_zero_and_sign() {
        assert_eq!(parse_duration("0"), Some(Duration::ZERO));
        assert_eq!(parse_duration("-0"), Some(Duration::ZERO));
        assert_eq!(parse_duration("-0s"), Some(Duration::ZERO));
        assert_eq!(parse_duration("-5s"), None);
        assert_eq!(parse_duration("15"), None);
    }

    #[test]
    fn parse_duration_rejects_overflow() {
        assert_eq!(parse_duration("3000000h"), None);
        assert_eq!(parse_duration("99999999999999999999999999999999999999999s"), None);
    }
}
