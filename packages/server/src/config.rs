//! Server configuration.
//!
//! Every option can be given on the command line or through the environment
//! variables used by the Jitsi deployment.

use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::domain::{RoomName, ValueObjectError};

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Duration string could not be parsed
    #[error("invalid duration {0:?}: expected e.g. \"5s\", \"250ms\" or \"1m30s\"")]
    InvalidDuration(String),

    /// Listen address is not `host:port`
    #[error("invalid listen address {0:?}: expected e.g. \":9339\" or \"127.0.0.1:9339\"")]
    InvalidHttpAddr(String),

    /// Room name is not valid
    #[error(transparent)]
    RoomName(#[from] ValueObjectError),
}

#[derive(Parser, Debug, Clone)]
#[command(name = "peephole-server")]
#[command(about = "Report the participant count of one Jitsi room", long_about = None)]
pub struct ServerConfig {
    /// Name of the room to report on
    #[arg(long, env = "PEEPHOLE_ROOM_NAME", value_parser = parse_room_name)]
    pub room_name: RoomName,

    /// Listen address as `host:port`; an empty host listens on all interfaces.
    /// Takes precedence over --host and --port
    #[arg(long, env = "PEEPHOLE_HTTP_ADDR", value_parser = parse_http_addr)]
    pub http_addr: Option<HttpAddr>,

    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "9339")]
    pub port: u16,

    /// How long a fetched census is served before asking upstream again
    #[arg(
        long,
        env = "PEEPHOLE_CACHE_EXPIRY",
        default_value = "5s",
        value_parser = parse_duration
    )]
    pub cache_expiry: Duration,

    /// Host of the Prosody HTTP service exposing /room-census
    #[arg(long, env = "XMPP_SERVER", default_value = "xmpp.meet.jitsi")]
    pub census_host: String,

    /// Port of the Prosody HTTP service
    #[arg(long, env = "PROSODY_HTTP_PORT", default_value = "5280")]
    pub census_port: u16,
}

/// Listen address given as a single `host:port` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpAddr {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Host and port to bind the server to
    pub fn listen_addr(&self) -> (String, u16) {
        match &self.http_addr {
            Some(addr) => (addr.host.clone(), addr.port),
            None => (self.host.clone(), self.port),
        }
    }
}

/// Parse a listen address such as `:9339`, `127.0.0.1:9339` or `[::1]:9339`.
pub fn parse_http_addr(value: &str) -> Result<HttpAddr, ConfigError> {
    let invalid = || ConfigError::InvalidHttpAddr(value.to_string());

    let (host, port) = value.trim().rsplit_once(':').ok_or_else(invalid)?;
    let port: u16 = port.parse().map_err(|_| invalid())?;
    let host = match host {
        "" => "0.0.0.0",
        bracketed if bracketed.starts_with('[') && bracketed.ends_with(']') => {
            match &bracketed[1..bracketed.len() - 1] {
                "" => return Err(invalid()),
                inner => inner,
            }
        }
        // IPv6 literals must be bracketed
        unbracketed if unbracketed.contains(':') => return Err(invalid()),
        plain => plain,
    };

    Ok(HttpAddr {
        host: host.to_string(),
        port,
    })
}

fn parse_room_name(value: &str) -> Result<RoomName, ConfigError> {
    Ok(RoomName::new(value.to_string())?)
}

/// Parse a duration such as `5s`, `250ms`, `1m30s` or `1.5h`.
///
/// Units: `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`, as in Go's
/// `time.ParseDuration`. Unlike Go, a bare number is taken as seconds.
pub fn parse_duration(input: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidDuration(input.to_string());

    let text = input.trim();
    if text.is_empty() {
        return Err(invalid());
    }
    if let Ok(seconds) = text.parse::<u64>() {
        return Ok(Duration::from_secs(seconds));
    }

    let is_number = |c: char| c.is_ascii_digit() || c == '.';
    let mut total = Duration::ZERO;
    let mut rest = text;
    while !rest.is_empty() {
        let number_end = rest.find(|c: char| !is_number(c)).ok_or_else(invalid)?;
        let (whole, fraction) = rest[..number_end]
            .split_once('.')
            .unwrap_or((&rest[..number_end], ""));
        rest = &rest[number_end..];

        let unit_end = rest.find(is_number).unwrap_or(rest.len());
        let nanos_per_unit: u64 = match &rest[..unit_end] {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" => 60 * 1_000_000_000,
            "h" => 3_600 * 1_000_000_000,
            _ => return Err(invalid()),
        };
        rest = &rest[unit_end..];

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        let whole: u64 = match whole {
            "" => 0,
            digits => digits.parse().map_err(|_| invalid())?,
        };
        let fraction: f64 = match fraction {
            "" => 0.0,
            digits => format!("0.{digits}").parse().map_err(|_| invalid())?,
        };

        let nanos = whole
            .checked_mul(nanos_per_unit)
            .and_then(|nanos| nanos.checked_add((fraction * nanos_per_unit as f64).round() as u64))
            .ok_or_else(invalid)?;
        total = total
            .checked_add(Duration::from_nanos(nanos))
            .ok_or_else(invalid)?;
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_units() {
        // テスト項目: 単位付きの文字列が Duration に変換される
        // then (期待する結果):
        assert_eq!(parse_duration("5s"), Ok(Duration::from_secs(5)));
        assert_eq!(parse_duration("250ms"), Ok(Duration::from_millis(250)));
        assert_eq!(parse_duration("2m"), Ok(Duration::from_secs(120)));
        assert_eq!(parse_duration("1h"), Ok(Duration::from_secs(3600)));
        assert_eq!(parse_duration("10us"), Ok(Duration::from_micros(10)));
        assert_eq!(parse_duration("10µs"), Ok(Duration::from_micros(10)));
        assert_eq!(parse_duration("7ns"), Ok(Duration::from_nanos(7)));
    }

    #[test]
    fn test_parse_duration_compound_and_fractional() {
        // テスト項目: 複数の単位や小数を組み合わせた文字列が変換される
        // then (期待する結果):
        assert_eq!(parse_duration("1m30s"), Ok(Duration::from_secs(90)));
        assert_eq!(parse_duration("1.5s"), Ok(Duration::from_millis(1500)));
        assert_eq!(parse_duration("0s"), Ok(Duration::ZERO));
    }

    #[test]
    fn test_parse_duration_bare_number_is_seconds() {
        // テスト項目: 単位のない数値は秒として扱われる
        // then (期待する結果):
        assert_eq!(parse_duration("2"), Ok(Duration::from_secs(2)));
        assert_eq!(parse_duration(" 5 "), Ok(Duration::from_secs(5)));
    }

    #[test]
    fn test_parse_duration_rejects_invalid_input() {
        // テスト項目: 不正な文字列はエラーになる
        // then (期待する結果):
        for input in ["", "s", "5x", "5 s", "-5s", "1.2.3s", "fives"] {
            assert_eq!(
                parse_duration(input),
                Err(ConfigError::InvalidDuration(input.to_string())),
                "accepted {input:?}"
            );
        }
    }

    #[test]
    fn test_server_config_defaults() {
        // テスト項目: ルーム名以外はデフォルト値が使われる
        // given (前提条件):
        let args = ["peephole-server", "--room-name", "room1"];

        // when (操作):
        let config = ServerConfig::try_parse_from(args).unwrap();

        // then (期待する結果):
        assert_eq!(config.room_name.as_str(), "room1");
        assert_eq!(config.http_addr, None);
        assert_eq!(config.listen_addr(), ("0.0.0.0".to_string(), 9339));
        assert_eq!(config.cache_expiry, Duration::from_secs(5));
        assert_eq!(config.census_host, "xmpp.meet.jitsi");
        assert_eq!(config.census_port, 5280);
    }

    #[test]
    fn test_server_config_overrides() {
        // テスト項目: コマンドライン引数で設定を上書きできる
        // given (前提条件):
        let args = [
            "peephole-server",
            "--room-name",
            "standup",
            "-H",
            "127.0.0.1",
            "-p",
            "8080",
            "--cache-expiry",
            "750ms",
            "--census-host",
            "prosody",
            "--census-port",
            "5281",
        ];

        // when (操作):
        let config = ServerConfig::try_parse_from(args).unwrap();

        // then (期待する結果):
        assert_eq!(config.room_name.as_str(), "standup");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.cache_expiry, Duration::from_millis(750));
        assert_eq!(config.census_host, "prosody");
        assert_eq!(config.census_port, 5281);
    }

    #[test]
    fn test_server_config_rejects_empty_room_name() {
        // テスト項目: 空のルーム名は設定エラーになる
        // given (前提条件):
        let args = ["peephole-server", "--room-name", ""];

        // when (操作):
        let result = ServerConfig::try_parse_from(args);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_server_config_rejects_bad_expiry() {
        // テスト項目: 不正な有効期限は設定エラーになる
        // given (前提条件):
        let args = ["peephole-server", "--room-name", "room1", "--cache-expiry", "soon"];

        // when (操作):
        let result = ServerConfig::try_parse_from(args);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_http_addr() {
        // テスト項目: host:port 形式の待ち受けアドレスが解析される
        // then (期待する結果):
        assert_eq!(
            parse_http_addr(":8080"),
            Ok(HttpAddr {
                host: "0.0.0.0".to_string(),
                port: 8080,
            })
        );
        assert_eq!(
            parse_http_addr("127.0.0.1:9339"),
            Ok(HttpAddr {
                host: "127.0.0.1".to_string(),
                port: 9339,
            })
        );
        assert_eq!(
            parse_http_addr("[::1]:9339"),
            Ok(HttpAddr {
                host: "::1".to_string(),
                port: 9339,
            })
        );
    }

    #[test]
    fn test_parse_http_addr_rejects_invalid_input() {
        // テスト項目: 不正な待ち受けアドレスはエラーになる
        // then (期待する結果):
        for input in ["", "9339", "localhost", ":http", ":70000", "::1:9339", "[]:9339"] {
            assert_eq!(
                parse_http_addr(input),
                Err(ConfigError::InvalidHttpAddr(input.to_string())),
                "accepted {input:?}"
            );
        }
    }

    #[test]
    fn test_http_addr_takes_precedence_over_host_and_port() {
        // テスト項目: --http-addr は --host / --port より優先される
        // given (前提条件):
        let args = [
            "peephole-server",
            "--room-name",
            "room1",
            "-H",
            "127.0.0.1",
            "-p",
            "3000",
            "--http-addr",
            ":8080",
        ];

        // when (操作):
        let config = ServerConfig::try_parse_from(args).unwrap();

        // then (期待する結果):
        assert_eq!(config.listen_addr(), ("0.0.0.0".to_string(), 8080));
    }

    #[test]
    fn test_listen_addr_defaults_to_host_and_port() {
        // テスト項目: --http-addr がない場合は --host / --port が使われる
        // given (前提条件):
        let args = ["peephole-server", "--room-name", "room1", "-p", "3000"];

        // when (操作):
        let config = ServerConfig::try_parse_from(args).unwrap();

        // then (期待する結果):
        assert_eq!(config.listen_addr(), ("0.0.0.0".to_string(), 3000));
    }
}
