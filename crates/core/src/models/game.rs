//! Static per-game portal descriptors

/// Browser User-Agent sent unless `USER_AGENT` overrides it
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:128.0) Gecko/20100101 Firefox/128.0";

const DEFAULT_LANG: &str = "en-us";
const ROLE_URL_BASE: &str = "https://api-os-takumi.mihoyo.com/binding/api/getUserGameRolesByCookie";

/// Endpoints and request decoration for one game's reward portal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameProfile {
    pub name: String,
    /// Reward campaign the claim applies to
    pub act_id: String,
    pub lang: String,
    pub referer_url: String,
    pub reward_url: String,
    pub role_url: String,
    pub info_url: String,
    pub sign_url: String,
    pub user_agent: String,
    pub extra_headers: Vec<(String, String)>,
}

/// Table row for the built-in portals
struct PortalSpec {
    name: &'static str,
    act_id: &'static str,
    referer_path: &'static str,
    api_base: &'static str,
    game_biz: &'static str,
    extra_headers: &'static [(&'static str, &'static str)],
}

const PORTALS: &[PortalSpec] = &[
    PortalSpec {
        name: "HI3",
        act_id: "e202110291205111",
        referer_path: "bbs/event/signin-bh3/index.html",
        api_base: "https://sg-public-api.hoyolab.com/event/mani",
        game_biz: "bh3_global",
        extra_headers: &[],
    },
    PortalSpec {
        name: "Genshin",
        act_id: "e202102251931481",
        referer_path: "ys/event/signin-sea-v3/e202102251931481.html",
        api_base: "https://sg-hk4e-api.hoyolab.com/event/sol",
        game_biz: "hk4e_global",
        extra_headers: &[],
    },
    PortalSpec {
        name: "ToT",
        act_id: "e202308141137581",
        referer_path: "bbs/event/signin/nxx/index.html",
        api_base: "https://sg-public-api.hoyolab.com/event/luna/os",
        game_biz: "nxx_global",
        extra_headers: &[],
    },
    PortalSpec {
        name: "HSR",
        act_id: "e202303301540311",
        referer_path: "bbs/event/signin/hkrpg/e202303301540311.html",
        api_base: "https://sg-public-api.hoyolab.com/event/luna/os",
        game_biz: "hkrpg_global",
        extra_headers: &[],
    },
    PortalSpec {
        name: "ZZZ",
        act_id: "e202406031448091",
        referer_path: "bbs/event/signin/zzz/e202406031448091.html",
        api_base: "https://sg-public-api.hoyolab.com/event/luna/zzz/os",
        game_biz: "nap_global",
        extra_headers: &[("x-rpc-signgame", "zzz")],
    },
];

impl PortalSpec {
    fn to_profile(&self, user_agent: &str) -> GameProfile {
        GameProfile {
            name: self.name.to_string(),
            act_id: self.act_id.to_string(),
            lang: DEFAULT_LANG.to_string(),
            referer_url: format!(
                "https://act.hoyolab.com/{}?act_id={}",
                self.referer_path, self.act_id
            ),
            reward_url: format!(
                "{}/home?lang={}&act_id={}",
                self.api_base, DEFAULT_LANG, self.act_id
            ),
            role_url: format!("{}?game_biz={}", ROLE_URL_BASE, self.game_biz),
            info_url: format!(
                "{}/info?lang={}&act_id={}",
                self.api_base, DEFAULT_LANG, self.act_id
            ),
            sign_url: format!("{}/sign?lang={}", self.api_base, DEFAULT_LANG),
            user_agent: user_agent.to_string(),
            extra_headers: self
                .extra_headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Names of every built-in game, in processing order
pub fn builtin_game_names() -> Vec<&'static str> {
    PORTALS.iter().map(|p| p.name).collect()
}

/// All built-in profiles, optionally with a global User-Agent override
pub fn builtin_profiles(user_agent: Option<&str>) -> Vec<GameProfile> {
    let ua = user_agent
        .map(str::trim)
        .filter(|ua| !ua.is_empty())
        .unwrap_or(DEFAULT_USER_AGENT);
    PORTALS.iter().map(|p| p.to_profile(ua)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genshin_urls() {
        let profiles = builtin_profiles(None);
        let genshin = profiles.iter().find(|p| p.name == "Genshin").unwrap();
        assert_eq!(
            genshin.info_url,
            "https://sg-hk4e-api.hoyolab.com/event/sol/info?lang=en-us&act_id=e202102251931481"
        );
        assert_eq!(
            genshin.sign_url,
            "https://sg-hk4e-api.hoyolab.com/event/sol/sign?lang=en-us"
        );
        assert_eq!(
            genshin.role_url,
            "https://api-os-takumi.mihoyo.com/binding/api/getUserGameRolesByCookie?game_biz=hk4e_global"
        );
        assert_eq!(genshin.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_user_agent_override_and_extra_headers() {
        let profiles = builtin_profiles(Some("TestAgent/1.0"));
        assert!(profiles.iter().all(|p| p.user_agent == "TestAgent/1.0"));

        let zzz = profiles.iter().find(|p| p.name == "ZZZ").unwrap();
        assert_eq!(
            zzz.extra_headers,
            vec![("x-rpc-signgame".to_string(), "zzz".to_string())]
        );
    }

    #[test]
    fn test_blank_override_keeps_default() {
        let profiles = builtin_profiles(Some("   "));
        assert_eq!(profiles[0].user_agent, DEFAULT_USER_AGENT);
        assert_eq!(builtin_game_names(), vec!["HI3", "Genshin", "ToT", "HSR", "ZZZ"]);
    }
}
