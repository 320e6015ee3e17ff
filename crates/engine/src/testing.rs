//! In-memory portal and chat fakes shared by the engine tests

use hoyo_core::{
    builtin_profiles, ApiEnvelope, Award, CheckInStatus, Cookie, Error, GameProfile, GameRole,
    Result, RewardCatalog, RoleList, SignResponse,
};
use hoyo_networking::{ChatApi, RewardApi};
use std::cell::{Cell, RefCell};

pub const VALID_COOKIE: &str = "account_id=1001; cookie_token=ct; ltoken=lt; ltuid=1001";

type ErrorFactory = Box<dyn Fn() -> Error>;

pub fn catalog(len: usize) -> RewardCatalog {
    RewardCatalog::new(
        (0..len)
            .map(|i| Award {
                name: format!("Reward {}", i),
                cnt: (i as u32 + 1) * 10,
                icon: String::new(),
            })
            .collect(),
    )
}

pub fn status(is_sign: bool, first_bind: bool, total_sign_day: u32) -> CheckInStatus {
    CheckInStatus {
        today: "2024-05-01".to_string(),
        total_sign_day,
        is_sign,
        first_bind,
    }
}

pub fn genshin() -> GameProfile {
    builtin_profiles(None)
        .into_iter()
        .find(|g| g.name == "Genshin")
        .expect("Genshin is built in")
}

enum ClaimBehavior {
    Reply { retcode: i64, message: String },
    Fail(ErrorFactory),
}

pub struct FakePortal {
    pub game: GameProfile,
    pub cookie: Cookie,
    roles: RoleList,
    status: CheckInStatus,
    catalog: RewardCatalog,
    claim: ClaimBehavior,
    roles_error: Option<ErrorFactory>,
    claims: Cell<u32>,
    requests: Cell<u32>,
}

impl FakePortal {
    pub fn new() -> Self {
        Self {
            game: genshin(),
            cookie: Cookie::new(VALID_COOKIE),
            roles: RoleList {
                list: vec![GameRole {
                    game_uid: "800000001".to_string(),
                    nickname: "Traveler".to_string(),
                    level: 60,
                    region_name: "Asia Server".to_string(),
                    region: "os_asia".to_string(),
                }],
            },
            status: status(false, false, 0),
            catalog: catalog(10),
            claim: ClaimBehavior::Reply {
                retcode: 0,
                message: "OK".to_string(),
            },
            roles_error: None,
            claims: Cell::new(0),
            requests: Cell::new(0),
        }
    }

    pub fn with_status(mut self, status: CheckInStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_catalog(mut self, catalog: RewardCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_roles(mut self, roles: Vec<GameRole>) -> Self {
        self.roles = RoleList { list: roles };
        self
    }

    pub fn claim_replies(mut self, retcode: i64, message: &str) -> Self {
        self.claim = ClaimBehavior::Reply {
            retcode,
            message: message.to_string(),
        };
        self
    }

    pub fn claim_fails(mut self, make: impl Fn() -> Error + 'static) -> Self {
        self.claim = ClaimBehavior::Fail(Box::new(make));
        self
    }

    pub fn roles_fail(mut self, make: impl Fn() -> Error + 'static) -> Self {
        self.roles_error = Some(Box::new(make));
        self
    }

    pub fn claim_calls(&self) -> u32 {
        self.claims.get()
    }

    /// Every call, claims included
    pub fn request_count(&self) -> u32 {
        self.requests.get()
    }

    fn touch(&self) {
        self.requests.set(self.requests.get() + 1);
    }
}

impl RewardApi for FakePortal {
    async fn fetch_roles(&self, _game: &GameProfile, _cookie: &Cookie) -> Result<RoleList> {
        self.touch();
        match &self.roles_error {
            Some(make) => Err(make()),
            None => Ok(self.roles.clone()),
        }
    }

    async fn fetch_rewards(&self, _game: &GameProfile, _cookie: &Cookie) -> Result<RewardCatalog> {
        self.touch();
        Ok(self.catalog.clone())
    }

    async fn fetch_status(&self, _game: &GameProfile, _cookie: &Cookie) -> Result<CheckInStatus> {
        self.touch();
        Ok(self.status.clone())
    }

    async fn claim(&self, _game: &GameProfile, _cookie: &Cookie) -> Result<SignResponse> {
        self.touch();
        self.claims.set(self.claims.get() + 1);
        match &self.claim {
            ClaimBehavior::Reply { retcode, message } => Ok(ApiEnvelope {
                retcode: *retcode,
                message: message.clone(),
                data: None,
            }),
            ClaimBehavior::Fail(make) => Err(make()),
        }
    }
}

/// Records every message; optionally rejects them all
#[derive(Default)]
pub struct FakeChat {
    pub sent: RefCell<Vec<(String, String)>>,
    pub fail_with: Option<String>,
}

impl FakeChat {
    pub fn failing(description: &str) -> Self {
        Self {
            sent: RefCell::new(Vec::new()),
            fail_with: Some(description.to_string()),
        }
    }
}

impl ChatApi for FakeChat {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<()> {
        self.sent
            .borrow_mut()
            .push((chat_id.to_string(), text.to_string()));
        match &self.fail_with {
            Some(description) => Err(Error::NotificationError(description.clone())),
            None => Ok(()),
        }
    }
}
