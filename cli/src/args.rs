//! Command line flags

use clap::Parser;
use hoyo_core::Account;

#[derive(Parser, Debug, Default)]
#[command(name = "hoyo-checkin")]
#[command(about = "Claim daily check-in rewards and report the results")]
pub struct Args {
    /// Only check in to these games (comma separated, e.g. Genshin,HSR)
    #[arg(long, value_delimiter = ',')]
    pub games: Vec<String>,

    /// Only process these account ids (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub accounts: Vec<String>,

    /// Log the report without sending a chat notification
    #[arg(long)]
    pub no_notify: bool,
}

impl Args {
    /// Narrow the loaded accounts to the requested ids and games.
    /// Accounts left with no game are dropped.
    pub fn filter_accounts(&self, accounts: Vec<Account>) -> Vec<Account> {
        let accounts = accounts
            .into_iter()
            .filter(|a| self.accounts.is_empty() || self.accounts.iter().any(|id| id.trim() == a.account_id));

        if self.games.is_empty() {
            return accounts.collect();
        }

        accounts
            .filter_map(|mut account| {
                account
                    .enabled_games
                    .retain(|g| self.games.iter().any(|wanted| wanted.trim().eq_ignore_ascii_case(g)));
                (!account.enabled_games.is_empty()).then_some(account)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoyo_core::Cookie;

    fn account(id: &str, games: &[&str]) -> Account {
        Account::new(id, Cookie::new("account_id=1")).with_games(games.iter().copied())
    }

    #[test]
    fn test_parse_comma_lists() {
        let args = Args::parse_from(["hoyo-checkin", "--games", "Genshin,HSR", "--no-notify"]);
        assert_eq!(args.games, vec!["Genshin", "HSR"]);
        assert!(args.accounts.is_empty());
        assert!(args.no_notify);
    }

    #[test]
    fn test_no_flags_keeps_everything() {
        let accounts = vec![account("1", &["Genshin"]), account("2", &["HSR"])];
        assert_eq!(Args::default().filter_accounts(accounts).len(), 2);
    }

    #[test]
    fn test_game_filter_drops_empty_accounts() {
        let args = Args {
            games: vec!["genshin".to_string()],
            ..Default::default()
        };
        let kept = args.filter_accounts(vec![
            account("1", &["Genshin", "HSR"]),
            account("2", &["ZZZ"]),
        ]);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].account_id, "1");
        assert_eq!(kept[0].enabled_games, vec!["Genshin"]);
    }

    #[test]
    fn test_account_filter() {
        let args = Args {
            accounts: vec!["2".to_string()],
            ..Default::default()
        };
        let kept = args.filter_accounts(vec![account("1", &["HSR"]), account("2", &["HSR"])]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].account_id, "2");
    }
}
