//! Friend and follow state transitions.

use mentormee_core::{Core, CoreError, NewUser, OutcomeKind, PendingRequest, SocialOutcome};

const ALICE: &str = "alice@x.com";
const BOB: &str = "bob@x.com";
const CAROL: &str = "carol@x.com";

fn core_with_users() -> Core {
    let mut core = Core::in_memory().unwrap();
    for (email, username) in [(ALICE, "alice"), (BOB, "bob"), (CAROL, "carol")] {
        core.register(NewUser {
            email: email.into(),
            username: username.into(),
            password: "pw123456".into(),
            first_name: "First".into(),
            last_name: "Last".into(),
        })
        .unwrap();
    }
    core
}

fn friend_emails(core: &Core, email: &str) -> Vec<String> {
    core.fetch_friends(email)
        .unwrap()
        .into_iter()
        .map(|u| u.email)
        .collect()
}

#[test]
fn alice_and_bob_become_friends() {
    let mut core = core_with_users();

    let sent = core.send_friend_request(ALICE, BOB).unwrap();
    assert_eq!(sent, SocialOutcome::RequestSent { username: "bob".into() });
    assert_eq!(
        core.fetch_friend_requests(BOB).unwrap(),
        vec![PendingRequest::pending(ALICE)]
    );

    let accepted = core.accept_friend_request(ALICE, BOB).unwrap();
    assert!(accepted.is_applied());
    assert_eq!(
        accepted.to_string(),
        "Friend request accepted. You are now friends with alice"
    );

    assert_eq!(friend_emails(&core, ALICE), vec![BOB]);
    assert_eq!(friend_emails(&core, BOB), vec![ALICE]);
    assert!(core.fetch_friend_requests(BOB).unwrap().is_empty());
}

#[test]
fn rejecting_leaves_friends_untouched() {
    let mut core = core_with_users();
    core.send_friend_request(ALICE, BOB).unwrap();

    let rejected = core.reject_friend_request(ALICE, BOB).unwrap();
    assert_eq!(rejected, SocialOutcome::Rejected { email: ALICE.into() });

    assert!(core.fetch_friend_requests(BOB).unwrap().is_empty());
    assert!(friend_emails(&core, ALICE).is_empty());
    assert!(friend_emails(&core, BOB).is_empty());
}

#[test]
fn second_request_is_a_soft_no_op() {
    let mut core = core_with_users();
    core.send_friend_request(ALICE, BOB).unwrap();

    let again = core.send_friend_request(ALICE, BOB).unwrap();
    assert_eq!(again.kind(), OutcomeKind::AlreadyExists);
    assert_eq!(again.to_string(), "Friend request already sent to bob");
    assert_eq!(core.fetch_friend_requests(BOB).unwrap().len(), 1);
}

#[test]
fn request_to_existing_friend_is_a_soft_no_op() {
    let mut core = core_with_users();
    core.send_friend_request(ALICE, BOB).unwrap();
    core.accept_friend_request(ALICE, BOB).unwrap();

    let again = core.send_friend_request(ALICE, BOB).unwrap();
    assert_eq!(again, SocialOutcome::AlreadyFriends { username: "bob".into() });
    assert!(core.fetch_friend_requests(BOB).unwrap().is_empty());
}

#[test]
fn answering_a_missing_request_is_a_soft_no_op() {
    let mut core = core_with_users();

    let accept = core.accept_friend_request(ALICE, BOB).unwrap();
    assert_eq!(accept, SocialOutcome::NoSuchRequest { from: "alice".into() });

    let reject = core.reject_friend_request(ALICE, BOB).unwrap();
    assert_eq!(reject, SocialOutcome::NoSuchRequest { from: ALICE.into() });
    assert!(!reject.is_applied());

    assert!(friend_emails(&core, BOB).is_empty());
}

#[test]
fn crossed_requests_do_not_duplicate_friends() {
    let mut core = core_with_users();
    core.send_friend_request(ALICE, BOB).unwrap();
    core.send_friend_request(BOB, ALICE).unwrap();

    core.accept_friend_request(ALICE, BOB).unwrap();
    // alice still holds bob's earlier request
    assert_eq!(
        core.fetch_friend_requests(ALICE).unwrap(),
        vec![PendingRequest::pending(BOB)]
    );
    core.accept_friend_request(BOB, ALICE).unwrap();

    assert_eq!(friend_emails(&core, ALICE), vec![BOB]);
    assert_eq!(friend_emails(&core, BOB), vec![ALICE]);
}

#[test]
fn follow_is_auto_accepted_and_one_directional() {
    let mut core = core_with_users();

    let followed = core.send_follow_request(ALICE, BOB).unwrap();
    assert_eq!(followed.to_string(), "You are now following bob");

    let bob = core.get_by_email(BOB).unwrap().unwrap();
    assert_eq!(bob.followers, vec![ALICE]);
    assert!(bob.follow_requests.is_empty());

    let alice = core.get_by_email(ALICE).unwrap().unwrap();
    assert!(alice.followers.is_empty());
    assert!(alice.friends.is_empty());

    let again = core.send_follow_request(ALICE, BOB).unwrap();
    assert_eq!(again, SocialOutcome::AlreadyFollowing { username: "bob".into() });

    let followers: Vec<_> = core
        .fetch_followers(BOB)
        .unwrap()
        .into_iter()
        .map(|u| u.email)
        .collect();
    assert_eq!(followers, vec![ALICE]);
}

#[test]
fn suggestions_exclude_self_and_friends_only() {
    let mut core = core_with_users();
    core.send_friend_request(ALICE, BOB).unwrap();
    core.accept_friend_request(ALICE, BOB).unwrap();
    // pending request and a follow do not hide carol
    core.send_friend_request(ALICE, CAROL).unwrap();
    core.send_follow_request(CAROL, ALICE).unwrap();

    let suggested: Vec<_> = core
        .fetch_suggested_friends(ALICE)
        .unwrap()
        .into_iter()
        .map(|u| u.email)
        .collect();
    assert_eq!(suggested, vec![CAROL]);
}

#[test]
fn unknown_users() {
    let mut core = core_with_users();
    const NOBODY: &str = "nobody@x.com";

    assert!(matches!(
        core.send_friend_request(ALICE, NOBODY),
        Err(CoreError::UserNotFound(_))
    ));
    assert!(matches!(
        core.send_friend_request(NOBODY, ALICE),
        Err(CoreError::UserNotFound(_))
    ));
    assert!(matches!(
        core.send_follow_request(ALICE, NOBODY),
        Err(CoreError::UserNotFound(_))
    ));
    assert!(matches!(
        core.send_follow_request(NOBODY, ALICE),
        Err(CoreError::UserNotFound(_))
    ));
    // nothing dangling was written
    assert!(core.get_by_email(ALICE).unwrap().unwrap().followers.is_empty());
    assert!(matches!(
        core.fetch_friend_requests(NOBODY),
        Err(CoreError::UserNotFound(_))
    ));
    assert!(matches!(
        core.fetch_suggested_friends(NOBODY),
        Err(CoreError::UserNotFound(_))
    ));
    assert!(core.fetch_friends(NOBODY).unwrap().is_empty());
    assert!(core.fetch_followers(NOBODY).unwrap().is_empty());
}
