//! Run configuration, built once from environment-style key/value pairs
//!
//! Accounts come from two layouts which are normalized into one list:
//! - legacy: `OS_COOKIE_<GAME>=cookie1@cookie2`, one variable per game
//! - named: `ACCOUNT_<ID>_COOKIES=cookie`
//!
//! Both layouts honour `ACCOUNT_<ID>_TELEGRAM_CHAT_ID` and
//! `ACCOUNT_<ID>_ENABLED_GAMES`. Legacy entries are read first (in game
//! order), named entries after them in key order; the first record seen for
//! an account id wins.

use crate::{builtin_game_names, builtin_profiles, Account, Cookie, Error, GameProfile, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_MAX_RETRY: u32 = 2;
const DEFAULT_CLAIM_DELAY_SECS: u64 = 2;
const REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_ERROR_LOG: &str = "error_log.txt";

const LEGACY_COOKIE_PREFIX: &str = "OS_COOKIE_";
const ACCOUNT_PREFIX: &str = "ACCOUNT_";
const COOKIES_SUFFIX: &str = "_COOKIES";

/// Chat-bot settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelegramConfig {
    pub bot_token: Option<String>,
    pub default_chat_id: Option<String>,
}

impl TelegramConfig {
    pub fn is_enabled(&self) -> bool {
        self.bot_token.is_some()
    }
}

/// SOCKS proxy applied to every outbound request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyConfig {
    pub use_proxy: bool,
    pub proxy_data: Option<String>,
}

impl ProxyConfig {
    /// Proxy URL when enabled and configured
    pub fn url(&self) -> Option<String> {
        if !self.use_proxy {
            return None;
        }
        let data = self.proxy_data.as_deref()?;
        if data.starts_with("socks5://") || data.starts_with("socks5h://") {
            Some(data.to_string())
        } else {
            Some(format!("socks5://{}", data))
        }
    }
}

/// Everything a run needs, passed by reference into each component
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub accounts: Vec<Account>,
    pub games: Vec<GameProfile>,
    pub telegram: TelegramConfig,
    pub proxy: ProxyConfig,
    /// Retries after the first attempt
    pub max_retry: u32,
    /// Pause before submitting a claim
    pub claim_delay: Duration,
    pub request_timeout: Duration,
    pub error_log_path: PathBuf,
}

impl AppConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Load from arbitrary key/value pairs
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = Vars::new(vars);

        let games = builtin_profiles(vars.get("USER_AGENT"));

        let telegram = TelegramConfig {
            bot_token: vars.first_of(&["BOT_TOKEN", "BOT_API"]),
            default_chat_id: vars.first_of(&["DEFAULT_CHAT_ID", "BOT_CHAT", "TELEGRAM_CHAT_ID"]),
        };

        let proxy = ProxyConfig {
            use_proxy: vars.flag("USE_PROXY"),
            proxy_data: vars.get("PROXY_DATA").map(str::to_string),
        };
        if proxy.use_proxy && proxy.proxy_data.is_none() {
            warn!("USE_PROXY is set but PROXY_DATA is empty; running without proxy");
        }

        let max_retry = vars.parse("MAX_RETRY", DEFAULT_MAX_RETRY)?;
        let claim_delay = Duration::from_secs(vars.parse("CLAIM_DELAY_SECS", DEFAULT_CLAIM_DELAY_SECS)?);
        let error_log_path = PathBuf::from(vars.get("ERROR_LOG_PATH").unwrap_or(DEFAULT_ERROR_LOG));

        let accounts = load_accounts(&vars);

        Ok(Self {
            accounts,
            games,
            telegram,
            proxy,
            max_retry,
            claim_delay,
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            error_log_path,
        })
    }

    /// Look up a game profile by name
    pub fn game(&self, name: &str) -> Option<&GameProfile> {
        self.games.iter().find(|g| g.name == name)
    }

    /// Chat an account reports to
    pub fn chat_for<'a>(&'a self, account: &'a Account) -> Option<&'a str> {
        account
            .chat_id
            .as_deref()
            .or(self.telegram.default_chat_id.as_deref())
    }
}

/// Sorted view over the raw variables; blank values count as unset
struct Vars(BTreeMap<String, String>);

impl Vars {
    fn new<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Vars(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn first_of(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|k| self.get(k)).map(str::to_string)
    }

    fn flag(&self, key: &str) -> bool {
        self.get(key)
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false)
    }

    fn parse<T: std::str::FromStr>(&self, key: &str, default: T) -> Result<T> {
        match self.get(key) {
            Some(raw) => raw
                .parse()
                .map_err(|_| Error::ConfigError(format!("invalid {}: {:?}", key, raw))),
            None => Ok(default),
        }
    }

    fn games_for(&self, account_id: &str) -> Option<Vec<String>> {
        self.get(&format!("{}{}_ENABLED_GAMES", ACCOUNT_PREFIX, account_id))
            .map(split_games)
    }

    fn chat_for(&self, account_id: &str) -> Option<String> {
        self.get(&format!("{}{}_TELEGRAM_CHAT_ID", ACCOUNT_PREFIX, account_id))
            .map(str::to_string)
    }

    /// `(id, cookie)` for every `ACCOUNT_<ID>_COOKIES` variable
    fn named_cookies(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().filter_map(|(key, value)| {
            let id = key
                .strip_prefix(ACCOUNT_PREFIX)?
                .strip_suffix(COOKIES_SUFFIX)?;
            let value = value.trim();
            (!id.is_empty() && !value.is_empty()).then_some((id, value))
        })
    }
}

fn split_games(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}

fn warn_missing_fields(account_id: &str, cookie: &Cookie) {
    let missing = cookie.missing_fields();
    if !missing.is_empty() {
        warn!(
            "Account {}: cookie is missing {}; check-in will likely fail",
            account_id,
            missing.join(", ")
        );
    }
}

fn load_accounts(vars: &Vars) -> Vec<Account> {
    let all_games = builtin_game_names();
    let mut accounts: Vec<Account> = Vec::new();

    for game in &all_games {
        let Some(raw) = vars.get(&format!("{}{}", LEGACY_COOKIE_PREFIX, game)) else {
            continue;
        };

        for (idx, entry) in raw.split('@').enumerate() {
            let cookie = Cookie::new(entry);
            if cookie.is_empty() {
                continue;
            }
            let account_id = cookie
                .account_id()
                .map(str::to_string)
                .unwrap_or_else(|| format!("{}_{}", game, idx));
            let explicit_games = vars.games_for(&account_id);

            if let Some(existing) = accounts.iter_mut().find(|a| a.account_id == account_id) {
                // Same cookie listed under several legacy variables
                if explicit_games.is_none() {
                    existing.enable_game(*game);
                }
                debug!("Account {} also listed for {}", account_id, game);
                continue;
            }

            warn_missing_fields(&account_id, &cookie);
            let games = explicit_games.unwrap_or_else(|| vec![game.to_string()]);
            accounts.push(
                Account::new(account_id.clone(), cookie)
                    .with_chat(vars.chat_for(&account_id))
                    .with_games(games),
            );
        }
    }

    for (account_id, raw) in vars.named_cookies() {
        if accounts.iter().any(|a| a.account_id == account_id) {
            warn!(
                "Account {} is defined in both OS_COOKIE_* and ACCOUNT_*_COOKIES; keeping the first",
                account_id
            );
            continue;
        }

        let cookie = Cookie::new(raw);
        warn_missing_fields(account_id, &cookie);
        let games = vars
            .games_for(account_id)
            .unwrap_or_else(|| all_games.iter().map(|g| g.to_string()).collect());
        accounts.push(
            Account::new(account_id, cookie)
                .with_chat(vars.chat_for(account_id))
                .with_games(games),
        );
    }

    accounts
}
