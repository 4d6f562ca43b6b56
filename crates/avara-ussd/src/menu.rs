//! Declarative menu tree and step-path resolution.
//!
//! [`resolve`] is a pure function from the parsed step path to a
//! [`MenuAction`] variant. Each path prefix maps to either a submenu
//! (continue state) or a terminal action; the compiler's exhaustiveness
//! checking replaces the original's nested string conditionals.
//!
//! Two quirks of the protocol text are load-bearing and covered by tests:
//! the unknown-top-level message has no trailing period, while unknown
//! codes deeper in the tree use `Invalid option.` and the region branch
//! uses `Invalid region.`.

use avara_core::catalog::{self, EventRecord, Region};

/// Resolved meaning of a session step path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    /// Empty path — render the root menu.
    RootMenu,
    /// `1` — render the event list.
    BuyMenu,
    /// `1*<code>` — render the payment confirmation for an event.
    ConfirmEvent(&'static EventRecord),
    /// `1*<code>*1` — initiate payment and issue a ticket.
    Purchase(&'static EventRecord),
    /// `2` — list the caller's tickets.
    MyTickets,
    /// `3` — render the wallet submenu.
    WalletMenu,
    /// `3*1` — wallet balance.
    WalletBalance,
    /// `3*2` — deposit instructions.
    WalletDeposit,
    /// `3*3` — withdrawal confirmation.
    WalletWithdraw,
    /// `4` — render the region list.
    RegionMenu,
    /// `4*<code>` — list events in a region.
    RegionEvents(&'static Region),
    /// `4*<code>` with an unknown region code.
    InvalidRegion,
    /// `5` — render the support submenu.
    SupportMenu,
    /// `5*1` — call-back request.
    SupportCallback,
    /// `5*2` — issue report.
    SupportReport,
    /// `0` — end the session.
    Exit,
    /// Unknown top-level code.
    Invalid,
    /// Unknown code deeper in the tree.
    InvalidOption,
}

/// Resolve a parsed step path against the menu tree.
///
/// Token at position *i* determines which submenu schema governs token
/// *i+1*; an out-of-range or unrecognized token at any position is a
/// terminal invalid state, never a panic.
pub fn resolve(steps: &[&str]) -> MenuAction {
    match steps {
        [] => MenuAction::RootMenu,

        ["1"] => MenuAction::BuyMenu,
        ["1", code] => catalog::event_by_global_code(code)
            .map_or(MenuAction::InvalidOption, MenuAction::ConfirmEvent),
        ["1", code, "1"] => catalog::event_by_global_code(code)
            .map_or(MenuAction::InvalidOption, MenuAction::Purchase),
        ["1", ..] => MenuAction::InvalidOption,

        // Extra tokens after "My Tickets" are ignored, matching the original flow.
        ["2", ..] => MenuAction::MyTickets,

        ["3"] => MenuAction::WalletMenu,
        ["3", "1", ..] => MenuAction::WalletBalance,
        ["3", "2", ..] => MenuAction::WalletDeposit,
        ["3", "3", ..] => MenuAction::WalletWithdraw,
        ["3", ..] => MenuAction::InvalidOption,

        ["4"] => MenuAction::RegionMenu,
        ["4", code] => {
            catalog::region_by_code(code).map_or(MenuAction::InvalidRegion, MenuAction::RegionEvents)
        }
        ["4", ..] => MenuAction::InvalidOption,

        ["5"] => MenuAction::SupportMenu,
        ["5", "1", ..] => MenuAction::SupportCallback,
        ["5", "2", ..] => MenuAction::SupportReport,
        ["5", ..] => MenuAction::InvalidOption,

        ["0", ..] => MenuAction::Exit,

        _ => MenuAction::Invalid,
    }
}

// ── Prompt rendering ─────────────────────────────────────────────────────────
//
// All prompts derive from the catalog so the menu text and the code
// resolution cannot drift apart.

/// The root menu prompt.
pub fn root_menu() -> String {
    "Welcome to AVARA\n\
     1. Buy Ticket\n\
     2. My Tickets\n\
     3. Wallet\n\
     4. Events Near Me\n\
     5. Support\n\
     0. Exit"
        .to_string()
}

/// The event list prompt for the "Buy Ticket" flow.
pub fn buy_menu() -> String {
    let mut out = String::from("Select Event:");
    for (i, event) in catalog::all_events().enumerate() {
        out.push_str(&format!("\n{}. {} ({})", i + 1, event.name, event.price));
    }
    out.push_str("\n0. Back");
    out
}

/// The payment confirmation prompt for one event.
pub fn confirm_event(event: &EventRecord) -> String {
    format!(
        "{}\nPrice: {} KES\n1. Pay with M-Pesa\n0. Cancel",
        event.name, event.price
    )
}

/// The wallet submenu prompt.
pub fn wallet_menu() -> String {
    "Wallet\n1. Balance\n2. Deposit\n3. Withdraw\n0. Back".to_string()
}

/// The region list prompt.
pub fn region_menu() -> String {
    let mut out = String::from("Select Region:");
    for (i, region) in catalog::REGIONS.iter().enumerate() {
        out.push_str(&format!("\n{}. {}", i + 1, region.name));
    }
    out.push_str("\n0. Back");
    out
}

/// The events listing for one region.
pub fn region_events(region: &Region) -> String {
    let list = region
        .events
        .iter()
        .map(|e| format!("{} - {} KES", e.name, e.price))
        .collect::<Vec<_>>()
        .join("\n");
    format!("Events in {}:\n{list}", region.name)
}

/// The support submenu prompt.
pub fn support_menu() -> String {
    "Support\n1. Request Call-Back\n2. Report Issue\n0. Back".to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_is_root_menu() {
        assert_eq!(resolve(&[]), MenuAction::RootMenu);
    }

    #[test]
    fn root_menu_exact_text() {
        assert_eq!(
            root_menu(),
            "Welcome to AVARA\n1. Buy Ticket\n2. My Tickets\n3. Wallet\n4. Events Near Me\n5. Support\n0. Exit"
        );
    }

    #[test]
    fn buy_menu_exact_text() {
        assert_eq!(
            buy_menu(),
            "Select Event:\n1. Nairobi Tech Fest (250)\n2. City Concert (350)\n3. Kiambu Expo (150)\n4. Kisumu Music Night (200)\n5. Mombasa Beach Party (500)\n0. Back"
        );
    }

    #[test]
    fn confirm_event_text() {
        let event = avara_core::catalog::event_by_global_code("1").unwrap();
        assert_eq!(
            confirm_event(event),
            "Nairobi Tech Fest\nPrice: 250 KES\n1. Pay with M-Pesa\n0. Cancel"
        );
    }

    #[test]
    fn region_menu_exact_text() {
        assert_eq!(
            region_menu(),
            "Select Region:\n1. Nairobi\n2. Kiambu\n3. Kisumu\n4. Mombasa\n0. Back"
        );
    }

    #[test]
    fn region_events_lists_all() {
        let nairobi = avara_core::catalog::region_by_code("1").unwrap();
        assert_eq!(
            region_events(nairobi),
            "Events in Nairobi:\nNairobi Tech Fest - 250 KES\nCity Concert - 350 KES"
        );
    }

    #[test]
    fn buy_flow_resolution() {
        assert_eq!(resolve(&["1"]), MenuAction::BuyMenu);
        assert!(matches!(resolve(&["1", "1"]), MenuAction::ConfirmEvent(e) if e.id == "E1"));
        assert!(matches!(resolve(&["1", "5"]), MenuAction::ConfirmEvent(e) if e.id == "E5"));
        assert!(matches!(resolve(&["1", "3", "1"]), MenuAction::Purchase(e) if e.id == "E3"));
    }

    #[test]
    fn buy_flow_invalid_codes() {
        assert_eq!(resolve(&["1", "6"]), MenuAction::InvalidOption);
        assert_eq!(resolve(&["1", "0"]), MenuAction::InvalidOption);
        assert_eq!(resolve(&["1", "x"]), MenuAction::InvalidOption);
        assert_eq!(resolve(&["1", "9", "1"]), MenuAction::InvalidOption);
        // Declined confirmation and over-long paths are terminal invalids.
        assert_eq!(resolve(&["1", "1", "2"]), MenuAction::InvalidOption);
        assert_eq!(resolve(&["1", "1", "1", "1"]), MenuAction::InvalidOption);
    }

    #[test]
    fn my_tickets_ignores_extra_tokens() {
        assert_eq!(resolve(&["2"]), MenuAction::MyTickets);
        assert_eq!(resolve(&["2", "7"]), MenuAction::MyTickets);
    }

    #[test]
    fn wallet_resolution() {
        assert_eq!(resolve(&["3"]), MenuAction::WalletMenu);
        assert_eq!(resolve(&["3", "1"]), MenuAction::WalletBalance);
        assert_eq!(resolve(&["3", "2"]), MenuAction::WalletDeposit);
        assert_eq!(resolve(&["3", "3"]), MenuAction::WalletWithdraw);
        assert_eq!(resolve(&["3", "9"]), MenuAction::InvalidOption);
    }

    #[test]
    fn region_resolution() {
        assert_eq!(resolve(&["4"]), MenuAction::RegionMenu);
        assert!(matches!(resolve(&["4", "2"]), MenuAction::RegionEvents(r) if r.name == "Kiambu"));
        assert_eq!(resolve(&["4", "9"]), MenuAction::InvalidRegion);
        assert_eq!(resolve(&["4", "1", "1"]), MenuAction::InvalidOption);
    }

    #[test]
    fn support_resolution() {
        assert_eq!(resolve(&["5"]), MenuAction::SupportMenu);
        assert_eq!(resolve(&["5", "1"]), MenuAction::SupportCallback);
        assert_eq!(resolve(&["5", "2"]), MenuAction::SupportReport);
        assert_eq!(resolve(&["5", "0"]), MenuAction::InvalidOption);
    }

    #[test]
    fn exit_resolution() {
        assert_eq!(resolve(&["0"]), MenuAction::Exit);
        assert_eq!(resolve(&["0", "1"]), MenuAction::Exit);
    }

    #[test]
    fn unknown_top_level_codes() {
        for code in ["6", "7", "9", "99", "a", "*", ""] {
            assert_eq!(resolve(&[code]), MenuAction::Invalid, "code: {code:?}");
        }
    }
}
