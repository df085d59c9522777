//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use uuid::Uuid;

use crate::models::{Invite, InviteTarget};

/// Validate that an invite headed for the store is internally consistent
pub fn assert_invite_invariants(invite: &Invite) {
    // Validation runs before persistence, so a blank email here is a bug
    debug_assert!(
        !invite.email.trim().is_empty(),
        "Invite {} has blank email",
        invite.id
    );

    // Token is assigned exactly once, before the row is written
    debug_assert!(
        !invite.token.is_empty(),
        "Invite {} has empty token",
        invite.id
    );

    debug_assert!(
        invite.sender_id != Uuid::nil(),
        "Invite {} has nil sender_id",
        invite.id
    );

    debug_assert!(
        invite.invitable_id != Uuid::nil(),
        "Invite {} has nil invitable_id",
        invite.id
    );
}

/// Validate that an invite target reference is usable
pub fn assert_target_valid(target: &InviteTarget, context: &str) {
    debug_assert!(
        target.id != Uuid::nil(),
        "Nil invitable id in context: {}",
        context
    );
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::InvitableType;

    fn make_invite() -> Invite {
        let now = Utc::now();
        Invite {
            id: Uuid::new_v4(),
            email: "a@example.com".to_string(),
            token: crate::token::generate(),
            sender_id: Uuid::new_v4(),
            recipient_id: None,
            invitable_id: Uuid::new_v4(),
            invitable_type: InvitableType::Team,
            role: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_valid_invite() {
        assert_invite_invariants(&make_invite());
    }

    #[test]
    #[should_panic(expected = "empty token")]
    fn test_empty_token_is_impossible_state() {
        let mut invite = make_invite();
        invite.token = String::new();
        assert_invite_invariants(&invite);
    }

    #[test]
    #[should_panic(expected = "blank email")]
    fn test_blank_email_is_impossible_state() {
        let mut invite = make_invite();
        invite.email = "   ".to_string();
        assert_invite_invariants(&invite);
    }

    #[test]
    fn test_valid_target() {
        let target = InviteTarget::new(Uuid::new_v4(), InvitableType::Team);
        assert_target_valid(&target, "test");
    }
}
