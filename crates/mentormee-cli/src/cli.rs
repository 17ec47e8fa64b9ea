//! Subcommands and their dispatch onto [`Core`].

use anyhow::{bail, Context};
use clap::{Args, Subcommand};
use mentormee_core::{Core, NewUser, ProfilePatch, PublicProfile, SocialOutcome, User};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account
    Register(RegisterArgs),

    /// Log in with an email or username and store a session token
    Login {
        /// Email or username
        input: String,
        #[arg(short, long)]
        password: String,
    },

    /// Forget the stored session token
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Find users whose username or email contains a query
    Search {
        /// Case-insensitive substring; empty lists everyone
        #[arg(default_value = "")]
        query: String,
    },

    /// Show a profile, or update your own when any field is given
    Profile(ProfileArgs),

    /// Manage posts
    #[command(subcommand)]
    Post(PostCommand),

    /// Manage comments
    #[command(subcommand)]
    Comment(CommentCommand),

    /// Friend requests and friendships
    #[command(subcommand)]
    Friend(FriendCommand),

    /// Follow a user
    Follow {
        /// Email of the user to follow
        email: String,
    },

    /// List followers of a user (default: you)
    Followers {
        email: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(short, long)]
    email: String,
    #[arg(short, long)]
    username: String,
    #[arg(short, long)]
    password: String,
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// Whose profile to show (default: you)
    #[arg(short, long)]
    email: Option<String>,
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    password: Option<String>,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
}

impl ProfileArgs {
    fn into_patch(self) -> Option<ProfilePatch> {
        let patch = ProfilePatch {
            username: self.username,
            password: self.password,
            first_name: self.first_name,
            last_name: self.last_name,
        };
        let empty = patch.username.is_none()
            && patch.password.is_none()
            && patch.first_name.is_none()
            && patch.last_name.is_none();
        (!empty).then_some(patch)
    }
}

#[derive(Debug, Subcommand)]
pub enum PostCommand {
    /// Publish a post as yourself
    Create { content: String },
    /// List every post
    List,
    /// Replace a post's content
    Edit { id: Uuid, content: String },
    /// Delete a post and its comments
    Delete { id: Uuid },
}

#[derive(Debug, Subcommand)]
pub enum CommentCommand {
    /// Comment on a post as yourself
    Add { post_id: Uuid, content: String },
    /// List comments on a post
    List { post_id: Uuid },
    /// Replace a comment's content
    Edit {
        post_id: Uuid,
        id: Uuid,
        content: String,
    },
    /// Delete a comment
    Delete { id: Uuid },
}

#[derive(Debug, Subcommand)]
pub enum FriendCommand {
    /// Send a friend request
    Request { email: String },
    /// Accept a pending request
    Accept { from: String },
    /// Reject a pending request
    Reject { from: String },
    /// List friends of a user (default: you)
    List { email: Option<String> },
    /// List your pending friend requests
    Requests,
    /// Users you are not friends with yet
    Suggest,
}

pub fn run(core: &mut Core, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Register(args) => {
            let user = core.register(NewUser {
                email: args.email,
                username: args.username,
                password: args.password,
                first_name: args.first_name,
                last_name: args.last_name,
            })?;
            print_json(&PublicProfile::from(&user))
        }
        Command::Login { input, password } => {
            let session = core.login(&input, &password)?;
            print_json(&json!({
                "user": PublicProfile::from(&session.user),
                "token": session.token,
            }))
        }
        Command::Logout => {
            core.logout()?;
            print_json(&json!({ "loggedOut": true }))
        }
        Command::Whoami => {
            let user = current_user(core)?;
            print_json(&PublicProfile::from(&user))
        }
        Command::Search { query } => print_json(&profiles(core.search(&query)?)),
        Command::Profile(args) => {
            if let Some(email) = args.email.clone() {
                if args.into_patch().is_some() {
                    bail!("only your own profile can be updated");
                }
                let user = core
                    .get_by_email(&email)?
                    .with_context(|| format!("no user with email {email}"))?;
                return print_json(&PublicProfile::from(&user));
            }

            let me = current_user(core)?;
            let user = match args.into_patch() {
                Some(patch) => core.update_profile(&me.email, patch)?,
                None => me,
            };
            print_json(&PublicProfile::from(&user))
        }
        Command::Post(cmd) => run_post(core, cmd),
        Command::Comment(cmd) => run_comment(core, cmd),
        Command::Friend(cmd) => run_friend(core, cmd),
        Command::Follow { email } => {
            let me = current_user(core)?;
            print_outcome(core.send_follow_request(&me.email, &email)?)
        }
        Command::Followers { email } => {
            let email = email_or_current(core, email)?;
            print_json(&profiles(core.fetch_followers(&email)?))
        }
    }
}

fn run_post(core: &mut Core, cmd: PostCommand) -> anyhow::Result<()> {
    match cmd {
        PostCommand::Create { content } => {
            let me = current_user(core)?;
            print_json(&core.create_post(&content, &me.username)?)
        }
        PostCommand::List => {
            let mut posts = core.list_posts()?;
            posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            print_json(&posts)
        }
        PostCommand::Edit { id, content } => {
            let me = current_user(core)?;
            print_json(&core.update_post(id, &content, &me.username)?)
        }
        PostCommand::Delete { id } => {
            core.delete_post(id)?;
            print_json(&json!({ "deleted": id }))
        }
    }
}

fn run_comment(core: &mut Core, cmd: CommentCommand) -> anyhow::Result<()> {
    match cmd {
        CommentCommand::Add { post_id, content } => {
            let me = current_user(core)?;
            print_json(&core.create_comment(post_id, &content, &me.username)?)
        }
        CommentCommand::List { post_id } => print_json(&core.list_comments(post_id)?),
        CommentCommand::Edit {
            post_id,
            id,
            content,
        } => {
            let me = current_user(core)?;
            print_json(&core.update_comment(id, &content, &me.username, post_id)?)
        }
        CommentCommand::Delete { id } => {
            core.delete_comment(id)?;
            print_json(&json!({ "deleted": id }))
        }
    }
}

fn run_friend(core: &mut Core, cmd: FriendCommand) -> anyhow::Result<()> {
    match cmd {
        FriendCommand::Request { email } => {
            let me = current_user(core)?;
            print_outcome(core.send_friend_request(&me.email, &email)?)
        }
        FriendCommand::Accept { from } => {
            let me = current_user(core)?;
            print_outcome(core.accept_friend_request(&from, &me.email)?)
        }
        FriendCommand::Reject { from } => {
            let me = current_user(core)?;
            print_outcome(core.reject_friend_request(&from, &me.email)?)
        }
        FriendCommand::List { email } => {
            let email = email_or_current(core, email)?;
            print_json(&profiles(core.fetch_friends(&email)?))
        }
        FriendCommand::Requests => {
            let me = current_user(core)?;
            print_json(&core.fetch_friend_requests(&me.email)?)
        }
        FriendCommand::Suggest => {
            let me = current_user(core)?;
            print_json(&profiles(core.fetch_suggested_friends(&me.email)?))
        }
    }
}

fn current_user(core: &Core) -> anyhow::Result<User> {
    match core.current_user()? {
        Some(user) => Ok(user),
        None => bail!("not logged in; run `mentormee login` first"),
    }
}

fn email_or_current(core: &Core, email: Option<String>) -> anyhow::Result<String> {
    match email {
        Some(email) => Ok(email),
        None => Ok(current_user(core)?.email),
    }
}

fn profiles(users: Vec<User>) -> Vec<PublicProfile> {
    users.iter().map(PublicProfile::from).collect()
}

fn print_outcome(outcome: SocialOutcome) -> anyhow::Result<()> {
    print_json(&json!({
        "message": outcome.to_string(),
        "kind": outcome.kind(),
        "result": outcome,
    }))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    println!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Command,
    }

    fn parse(args: &[&str]) -> Command {
        TestCli::try_parse_from(std::iter::once("mentormee").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn parses_nested_subcommands() {
        let id = Uuid::new_v4().to_string();
        match parse(&["post", "edit", &id, "new text"]) {
            Command::Post(PostCommand::Edit { content, .. }) => assert_eq!(content, "new text"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            parse(&["friend", "accept", "alice@x.com"]),
            Command::Friend(FriendCommand::Accept { .. })
        ));
    }

    #[test]
    fn rejects_malformed_ids() {
        let result = TestCli::try_parse_from(["mentormee", "comment", "list", "not-a-uuid"]);
        assert!(result.is_err());
    }

    #[test]
    fn profile_without_fields_is_a_lookup() {
        let args = ProfileArgs {
            email: None,
            username: None,
            password: None,
            first_name: None,
            last_name: None,
        };
        assert!(args.into_patch().is_none());
    }

    #[test]
    fn commands_act_as_the_logged_in_user() {
        let mut core = Core::in_memory().unwrap();
        assert!(run(&mut core, Command::Whoami).is_err());

        for (email, username) in [("alice@x.com", "alice"), ("bob@x.com", "bob")] {
            run(
                &mut core,
                parse(&[
                    "register", "-e", email, "-u", username, "-p", "pw",
                    "--first-name", "F", "--last-name", "L",
                ]),
            )
            .unwrap();
        }

        run(&mut core, parse(&["login", "alice", "-p", "pw"])).unwrap();
        run(&mut core, parse(&["friend", "request", "bob@x.com"])).unwrap();
        run(&mut core, parse(&["post", "create", "hi"])).unwrap();

        let bob = core.get_by_email("bob@x.com").unwrap().unwrap();
        assert!(bob.has_friend_request_from("alice@x.com"));
        assert_eq!(core.list_posts().unwrap()[0].author, "alice");

        run(&mut core, Command::Logout).unwrap();
        assert!(run(&mut core, parse(&["follow", "bob@x.com"])).is_err());
    }
}
