use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use rpassword::prompt_password;
use shared::{
    guard::RouteAccess,
    models::User,
    state::{
        FormState,
        auth::{login_error_message, register_error_message},
        forms::{LoginField, LoginForm, RegistrationField, RegistrationForm},
    },
};

use super::{Context, prompt, validation_failure};

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Sign in with email and password; the password is prompted for
    Login {
        #[arg(long, short)]
        email: Option<String>,
    },
    /// Create an account and sign in with it
    Register(RegisterArgs),
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    /// Date of birth as YYYY-MM-DD
    #[arg(long)]
    pub date_of_birth: String,
    /// Identifier of the monitoring device paired with the account
    #[arg(long)]
    pub device_id: String,
}

pub async fn run(context: &Context, command: AuthCommand) -> Result<()> {
    match command {
        AuthCommand::Login { email } => login(context, email).await,
        AuthCommand::Register(args) => register(context, args).await,
        AuthCommand::Logout => {
            logout(context);
            Ok(())
        }
        AuthCommand::Whoami => {
            whoami(context);
            Ok(())
        }
    }
}

async fn login(context: &Context, email: Option<String>) -> Result<()> {
    context.require(RouteAccess::GuestOnly)?;

    let mut form = FormState::new(LoginForm::default());
    let email = match email {
        Some(email) => email,
        None => prompt("Email: ")?,
    };
    form.change(LoginField::Email, email);
    form.change(LoginField::Password, prompt_password("Password: ")?);
    if !form.submit() {
        return Err(validation_failure(&form));
    }

    let result = context.auth.login(&form.values().to_request()).await;
    form.finish_submit();
    match result {
        Ok(user) => {
            print_user_summary("Logged in as", &user);
            Ok(())
        }
        Err(err) => bail!(login_error_message(&err)),
    }
}

async fn register(context: &Context, args: RegisterArgs) -> Result<()> {
    context.require(RouteAccess::GuestOnly)?;

    let mut form = FormState::new(RegistrationForm {
        name: args.name,
        email: args.email,
        date_of_birth: args.date_of_birth,
        device_id: args.device_id,
        ..RegistrationForm::default()
    });
    form.change(RegistrationField::Password, prompt_password("Password: ")?);
    form.change(
        RegistrationField::ConfirmPassword,
        prompt_password("Confirm password: ")?,
    );
    if !form.submit() {
        return Err(validation_failure(&form));
    }

    let result = context.auth.register(&form.values().to_request()).await;
    form.finish_submit();
    match result {
        Ok(user) => {
            print_user_summary("Registered and logged in as", &user);
            Ok(())
        }
        Err(err) => bail!(register_error_message(&err)),
    }
}

fn logout(context: &Context) {
    let was_signed_in = context.auth.is_authenticated();
    context.auth.logout();
    if was_signed_in {
        println!("Logged out. Removed session at {}", context.config.session_path.display());
    } else {
        println!("No active session.");
    }
}

fn whoami(context: &Context) {
    match context.auth.user() {
        Some(user) => {
            print_user_summary("Signed in as", &user);
            println!("api: {}", context.config.api_base_url);
        }
        None => println!("Not signed in."),
    }
}

fn print_user_summary(heading: &str, user: &User) {
    println!("{heading} {} <{}>", user.name, user.email);
    println!("id: {}", user.id);
    println!("role: {}", user.role);
    if !user.device_id.is_empty() {
        println!("device: {}", user.device_id);
    }
}
