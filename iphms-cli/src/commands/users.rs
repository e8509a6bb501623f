use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use rpassword::prompt_password;
use shared::{
    guard::RouteAccess,
    models::{User, format_date},
    state::{
        FormState,
        forms::{ProfileField, ProfileForm},
        users::{self, USER_NOT_FOUND},
    },
};

use super::{Context, prompt, render, validation_failure};

const USER_HEADERS: [&str; 6] = ["ID", "Name", "Email", "Role", "Device", "Created"];

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List every account (administrators only)
    List,
    /// Show one account
    Show { id: u64 },
    /// Change fields of an account; omitted fields are left as they are
    Update(UpdateArgs),
    /// Delete an account (administrators only)
    Delete {
        id: u64,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    pub id: u64,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub date_of_birth: Option<String>,
    #[arg(long)]
    pub device_id: Option<String>,
    /// Prompt for a new password
    #[arg(long)]
    pub password: bool,
}

pub async fn run(context: &Context, command: UsersCommand) -> Result<()> {
    match command {
        UsersCommand::List => list(context).await,
        UsersCommand::Show { id } => show(context, id).await,
        UsersCommand::Update(args) => update(context, args).await,
        UsersCommand::Delete { id, yes } => delete(context, id, yes).await,
    }
}

async fn list(context: &Context) -> Result<()> {
    context.require(RouteAccess::Admin)?;
    let users = match users::load_users(&context.users).await {
        Ok(users) => users,
        Err(message) => bail!(message),
    };

    let rows: Vec<Vec<String>> = users.iter().map(user_row).collect();
    println!("{}", render::table(&USER_HEADERS, &rows));
    println!("{} user(s)", users.len());
    Ok(())
}

fn user_row(user: &User) -> Vec<String> {
    vec![
        user.id.to_string(),
        user.name.clone(),
        user.email.clone(),
        user.role.to_string(),
        user.device_id.clone(),
        format_date(user.created_at.as_ref(), false),
    ]
}

async fn show(context: &Context, id: u64) -> Result<()> {
    context.require(RouteAccess::Authenticated)?;
    let user = match users::load_user(&context.users, id).await {
        Ok(user) => user,
        Err(message) => bail!(message),
    };

    println!("id:            {}", user.id);
    println!("name:          {}", user.name);
    println!("email:         {}", user.email);
    println!("role:          {}", user.role);
    println!("date of birth: {}", user.date_of_birth);
    println!("device:        {}", user.device_id);
    println!("created:       {}", format_date(user.created_at.as_ref(), true));
    println!("updated:       {}", format_date(user.updated_at.as_ref(), true));
    Ok(())
}

async fn update(context: &Context, args: UpdateArgs) -> Result<()> {
    context.require(RouteAccess::Authenticated)?;
    let current = match users::load_user(&context.users, args.id).await {
        Ok(user) => user,
        Err(message) => bail!(message),
    };

    let mut form = FormState::new(ProfileForm::from_user(&current));
    let edits = [
        (ProfileField::Name, args.name),
        (ProfileField::Email, args.email),
        (ProfileField::DateOfBirth, args.date_of_birth),
        (ProfileField::DeviceId, args.device_id),
    ];
    for (field, value) in edits {
        if let Some(value) = value {
            form.change(field, value);
        }
    }
    if args.password {
        form.change(ProfileField::Password, prompt_password("New password: ")?);
        form.change(
            ProfileField::ConfirmPassword,
            prompt_password("Confirm new password: ")?,
        );
    }
    if !form.submit() {
        return Err(validation_failure(&form));
    }

    let changes = form.values().changes(&current);
    let outcome = users::update_user(&context.users, current.id, &changes).await;
    form.finish_submit();
    match outcome {
        Ok((user, notice)) => {
            ProfileForm::clear_passwords(&mut form);
            println!("{}", notice.text);
            println!("{}", render::table(&USER_HEADERS, &[user_row(&user)]));
            Ok(())
        }
        Err(notice) => bail!(notice.text),
    }
}

async fn delete(context: &Context, id: u64, yes: bool) -> Result<()> {
    context.require(RouteAccess::Admin)?;
    let mut users = match users::load_users(&context.users).await {
        Ok(users) => users,
        Err(message) => bail!(message),
    };
    let Some(target) = users.iter().find(|user| user.id == id) else {
        bail!(USER_NOT_FOUND);
    };

    if !yes {
        let answer = prompt(&format!(
            "Delete user {} <{}>? This cannot be undone. [y/N] ",
            target.name, target.email
        ))?;
        if !matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    match users::delete_user(&context.users, &mut users, id).await {
        Ok(notice) => {
            println!("{} ({} remaining)", notice.text, users.len());
            Ok(())
        }
        Err(notice) => bail!(notice.text),
    }
}
