//! Reward portal client with cookie-based authentication

use crate::{HttpClient, HttpRequest, RewardApi};
use hoyo_core::{
    ApiEnvelope, CheckInStatus, Cookie, Error, GameProfile, Result, RewardCatalog, RoleList,
    SignRequest, SignResponse,
};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, COOKIE, REFERER, USER_AGENT};
use tracing::{debug, instrument};

/// HTTP client for a game's daily reward portal
///
/// Emulates browser requests: every call carries the account cookie, the
/// game's User-Agent and referer, plus any per-game extra headers.
#[derive(Clone)]
pub struct PortalClient {
    http: HttpClient,
}

impl PortalClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Headers for requests on behalf of one account
    fn default_headers(game: &GameProfile, cookie: &Cookie) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        headers.insert(USER_AGENT, header_value("User-Agent", &game.user_agent)?);
        headers.insert(REFERER, header_value("Referer", &game.referer_url)?);
        headers.insert(
            COOKIE,
            HeaderValue::from_str(cookie.as_str()).map_err(|_| {
                Error::AuthenticationError("cookie contains characters not allowed in a header".to_string())
            })?,
        );

        for (name, value) in &game.extra_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::InvalidData(format!("header name {:?}: {}", name, e)))?;
            headers.insert(name, header_value("extra header", value)?);
        }

        Ok(headers)
    }

    async fn get_data<T>(&self, url: &str, game: &GameProfile, cookie: &Cookie) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let request = HttpRequest::get(url).headers(Self::default_headers(game, cookie)?);
        let envelope: ApiEnvelope<T> = self.http.execute_json(&request).await?;
        envelope.into_data()
    }
}

fn header_value(what: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| Error::InvalidData(format!("{}: {}", what, e)))
}

impl RewardApi for PortalClient {
    #[instrument(skip(self, game, cookie), fields(game = %game.name))]
    async fn fetch_roles(&self, game: &GameProfile, cookie: &Cookie) -> Result<RoleList> {
        let roles: RoleList = self.get_data(&game.role_url, game, cookie).await?;
        debug!("Fetched {} roles", roles.list.len());
        Ok(roles)
    }

    #[instrument(skip(self, game, cookie), fields(game = %game.name))]
    async fn fetch_rewards(&self, game: &GameProfile, cookie: &Cookie) -> Result<RewardCatalog> {
        let catalog: RewardCatalog = self.get_data(&game.reward_url, game, cookie).await?;
        debug!("Reward catalog has {} entries", catalog.len());
        Ok(catalog)
    }

    #[instrument(skip(self, game, cookie), fields(game = %game.name))]
    async fn fetch_status(&self, game: &GameProfile, cookie: &Cookie) -> Result<CheckInStatus> {
        let status: CheckInStatus = self.get_data(&game.info_url, game, cookie).await?;
        debug!(
            "Check-in status: today={}, is_sign={}, first_bind={}, total_sign_day={}",
            status.today, status.is_sign, status.first_bind, status.total_sign_day
        );
        Ok(status)
    }

    #[instrument(skip(self, game, cookie), fields(game = %game.name))]
    async fn claim(&self, game: &GameProfile, cookie: &Cookie) -> Result<SignResponse> {
        let body = serde_json::to_string(&SignRequest {
            act_id: game.act_id.clone(),
        })?;

        let mut headers = Self::default_headers(game, cookie)?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let request = HttpRequest::post(&game.sign_url).headers(headers).body(body);
        let response: SignResponse = self.http.execute_json(&request).await?;

        debug!("Sign response: retcode={}, message={}", response.retcode, response.message);
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoyo_core::builtin_profiles;

    #[test]
    fn test_default_headers() {
        let zzz = builtin_profiles(None)
            .into_iter()
            .find(|g| g.name == "ZZZ")
            .unwrap();
        let cookie = Cookie::new("account_id=1; ltoken=x");

        let headers = PortalClient::default_headers(&zzz, &cookie).unwrap();
        assert_eq!(headers.get(COOKIE).unwrap(), "account_id=1; ltoken=x");
        assert_eq!(headers.get(REFERER).unwrap().to_str().unwrap(), zzz.referer_url);
        assert_eq!(headers.get("x-rpc-signgame").unwrap(), "zzz");
    }

    #[test]
    fn test_unencodable_cookie_is_auth_error() {
        let game = builtin_profiles(None).remove(0);
        let cookie = Cookie::new("account_id=1;\nltoken=x");
        assert!(matches!(
            PortalClient::default_headers(&game, &cookie),
            Err(Error::AuthenticationError(_))
        ));
    }
}
