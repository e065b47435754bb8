//! login / logout / whoami.

use std::fmt::Write as _;
use std::io::{BufRead, IsTerminal};

use canteen_core::model::ProfileExt;
use canteen_core::{AppContext, Credentials, UserProfile};
use dialoguer::Input;
use secrecy::SecretString;

use crate::cli::{GlobalOpts, LoginArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn read_login(args: &LoginArgs, profile: &str) -> Result<String, CliError> {
    if let Some(ref name) = args.username {
        return Ok(name.clone());
    }
    let cfg = config::load_config_or_default();
    if let Some(name) = cfg.profiles.get(profile).and_then(|p| p.username.clone()) {
        return Ok(name);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::Validation {
            field: "username".into(),
            reason: "pass --username when stdin is not a terminal".into(),
        });
    }
    Input::new()
        .with_prompt("Login")
        .interact_text()
        .map_err(prompt_err)
}

fn read_password(args: &LoginArgs) -> Result<SecretString, CliError> {
    let raw = if args.password_stdin {
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        line.trim_end_matches(['\r', '\n']).to_owned()
    } else {
        rpassword::prompt_password("Password: ").map_err(prompt_err)?
    };
    if raw.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(SecretString::from(raw))
}

fn format_profile(profile: &UserProfile, ctx: &AppContext) -> String {
    let locale = ctx.config().locale;
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", profile.display_name(), profile.login);
    let _ = writeln!(out, "  School:     {}", profile.school_name(locale));
    let _ = writeln!(out, "  School BIN: {}", profile.school_bin);
    let _ = writeln!(out, "  Warehouse:  {}", profile.warehouse_label());
    if !profile.user_phone.is_empty() {
        let _ = writeln!(out, "  Phone:      {}", profile.user_phone);
    }
    out.trim_end().to_owned()
}

pub async fn login(
    ctx: &AppContext,
    profile: &str,
    args: &LoginArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let login = read_login(args, profile)?;
    let password = read_password(args)?;

    let user = ctx
        .session()
        .login(&Credentials::new(login, password))
        .await?;

    if !global.quiet {
        eprintln!("Signed in as {} [{profile}]", user.display_name());
    }
    Ok(())
}

pub fn logout(ctx: &AppContext, global: &GlobalOpts) -> Result<(), CliError> {
    ctx.session().logout();
    if !global.quiet {
        eprintln!("Signed out");
    }
    Ok(())
}

pub fn whoami(ctx: &AppContext, global: &GlobalOpts) -> Result<(), CliError> {
    let Some(profile) = ctx.session().profile() else {
        return Err(CliError::NotSignedIn);
    };
    let out = output::render_single(
        &global.output,
        &profile,
        |p| format_profile(p, ctx),
        |p| p.login.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
