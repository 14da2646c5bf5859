use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use serde_json::json;
use std::path::Path;
use veil_core::{
    account::{self, Accounts, Session},
    paths,
    profile::Profile,
    VeilError,
};

#[derive(Subcommand)]
pub enum AuthSubcommand {
    /// Create an account and sign in
    SignUp {
        /// Email address (stored lowercase)
        #[arg(long)]
        email: String,

        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign in to an existing account
    SignIn {
        #[arg(long)]
        email: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Clear the current session
    SignOut,

    /// Show the signed-in account
    Whoami,
}

pub fn run(root: &Path, subcommand: AuthSubcommand, json: bool) -> anyhow::Result<()> {
    match subcommand {
        AuthSubcommand::SignUp {
            email,
            name,
            password,
        } => sign_up(root, &email, name, password, json),
        AuthSubcommand::SignIn { email, password } => sign_in(root, &email, password, json),
        AuthSubcommand::SignOut => sign_out(root, json),
        AuthSubcommand::Whoami => whoami(root, json),
    }
}

fn sign_up(
    root: &Path,
    email: &str,
    name: Option<String>,
    password: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    paths::require_initialized(root)?;
    let password = resolve_password(password)?;

    let mut accounts = Accounts::load(root).context("failed to load account registry")?;
    let account = accounts.sign_up(email, name, &password)?;
    accounts.save(root).context("failed to save account registry")?;

    let profile = Profile::create(
        root,
        &account.user_id,
        &account.email,
        account.display_name.clone(),
    )
    .context("failed to create profile")?;
    Session::set(root, &account.user_id)?;

    if json {
        return print_json(&json!({
            "user_id": account.user_id,
            "email": account.email,
            "display_name": account.display_name,
        }));
    }

    println!("Signed up as {}.", profile.email);
    println!("Next: veil act draw");
    Ok(())
}

fn sign_in(
    root: &Path,
    email: &str,
    password: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    paths::require_initialized(root)?;
    let password = resolve_password(password)?;

    let mut accounts = Accounts::load(root).context("failed to load account registry")?;
    let account = accounts.sign_in(email, &password)?;
    accounts.save(root).context("failed to save account registry")?;

    // A registry entry without its document gets one rebuilt zeroed.
    let mut profile = match Profile::load(root, &account.user_id) {
        Ok(p) => p,
        Err(VeilError::ProfileNotFound(_)) => Profile::create(
            root,
            &account.user_id,
            &account.email,
            account.display_name.clone(),
        )?,
        Err(e) => return Err(e.into()),
    };
    profile.touch_login();
    profile.save(root)?;
    Session::set(root, &account.user_id)?;

    if json {
        return print_json(&json!({
            "user_id": account.user_id,
            "email": account.email,
            "display_name": account.display_name,
        }));
    }

    println!("Signed in as {}.", account.email);
    Ok(())
}

fn sign_out(root: &Path, json: bool) -> anyhow::Result<()> {
    paths::require_initialized(root)?;
    let session = Session::current(root)?;
    Session::clear(root)?;

    if json {
        return print_json(&json!({ "signed_out": session.is_some() }));
    }

    match session {
        Some(_) => println!("Signed out."),
        None => println!("No one was signed in."),
    }
    Ok(())
}

fn whoami(root: &Path, json: bool) -> anyhow::Result<()> {
    paths::require_initialized(root)?;
    let account = account::require_current(root)?;

    if json {
        return print_json(&json!({
            "user_id": account.user_id,
            "email": account.email,
            "display_name": account.display_name,
        }));
    }

    match &account.display_name {
        Some(name) => println!("{} <{}>", name, account.email),
        None => println!("{}", account.email),
    }
    Ok(())
}

/// Take the password from the flag, or prompt for it.
fn resolve_password(flag: Option<String>) -> anyhow::Result<String> {
    match flag {
        Some(p) => Ok(p),
        None => Ok(dialoguer::Password::new()
            .with_prompt("Password")
            .interact()?),
    }
}
