use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use shared::{
    guard::RouteAccess,
    models::{CreateVitalsRequest, VitalKind, Vitals, VitalsQuery, format_date},
    state::{
        Paginator, VitalsScope, chart_series,
        vitals::{self, CHART_WINDOW, list_error_message},
    },
};
use tracing::{debug, warn};

use super::{Context, render};

const RECORD_FAILED: &str = "Failed to record vitals";

#[derive(Subcommand, Debug)]
pub enum VitalsCommand {
    /// List readings, newest first
    List(ListArgs),
    /// Show one reading
    Show { id: u64 },
    /// Record a reading
    Create(CreateArgs),
    /// Plot the latest readings of one metric
    Chart {
        /// temperature, humidity, pulse or light
        metric: VitalKind,
        /// Plot another user's readings instead of your own
        #[arg(long)]
        user_id: Option<u64>,
    },
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only readings for this user
    #[arg(long, conflicts_with = "all")]
    pub user_id: Option<u64>,
    /// Include readings of every user the server lets you see
    #[arg(long)]
    pub all: bool,
    #[arg(long, value_name = "DATE")]
    pub start_date: Option<String>,
    #[arg(long, value_name = "DATE")]
    pub end_date: Option<String>,
    /// Keep only the newest N readings
    #[arg(long)]
    pub limit: Option<usize>,
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    #[arg(long, default_value_t = 10)]
    pub per_page: usize,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Body temperature in °C
    #[arg(long)]
    pub temperature: f64,
    /// Ambient humidity in %
    #[arg(long)]
    pub humidity: f64,
    /// Pulse rate in BPM
    #[arg(long)]
    pub pulse_rate: f64,
    /// Light intensity in lux
    #[arg(long)]
    pub light_intensity: f64,
    /// Owner of the reading; defaults to the signed-in user
    #[arg(long)]
    pub user_id: Option<u64>,
}

pub async fn run(context: &Context, command: VitalsCommand) -> Result<()> {
    context.require(RouteAccess::Authenticated)?;
    match command {
        VitalsCommand::List(args) => list(context, args).await,
        VitalsCommand::Show { id } => show(context, id).await,
        VitalsCommand::Create(args) => create(context, args).await,
        VitalsCommand::Chart { metric, user_id } => chart(context, metric, user_id).await,
    }
}

fn list_query(context: &Context, args: &ListArgs) -> VitalsQuery {
    let mut query = match args.user_id {
        Some(user_id) => VitalsQuery::for_user(user_id),
        None => VitalsScope {
            current_user_only: !args.all,
            limit: None,
        }
        .query(context.auth.user().as_ref()),
    };
    query.start_date.clone_from(&args.start_date);
    query.end_date.clone_from(&args.end_date);
    query
}

async fn list(context: &Context, args: ListArgs) -> Result<()> {
    let query = list_query(context, &args);
    debug!(?query, "listing vitals");
    let mut readings = match context.vitals.list(&query).await {
        Ok(readings) => readings,
        Err(err) => {
            warn!(error = %err, "failed to fetch vitals");
            bail!(list_error_message(&err));
        }
    };
    if let Some(limit) = args.limit {
        readings.truncate(limit);
    }

    let mut paginator = Paginator::new(args.per_page, readings.len());
    paginator.go_to(args.page);
    let rows: Vec<Vec<String>> = paginator.items(&readings).iter().map(reading_row).collect();
    if !rows.is_empty() {
        println!(
            "{}",
            render::table(
                &["ID", "Date", "Temp", "Humidity", "Pulse", "Light", "User"],
                &rows
            )
        );
    }
    println!(
        "{}",
        render::page_footer(&paginator.info(), &paginator.page_numbers())
    );
    Ok(())
}

fn reading_row(reading: &Vitals) -> Vec<String> {
    let mut row = vec![
        reading.id.to_string(),
        format_date(reading.created_at.as_ref(), true),
    ];
    row.extend(
        VitalKind::ALL
            .iter()
            .map(|kind| kind.format_value(reading.value(*kind))),
    );
    row.push(reading.user_id.to_string());
    row
}

async fn show(context: &Context, id: u64) -> Result<()> {
    let reading = match vitals::load_vital(&context.vitals, id).await {
        Ok(reading) => reading,
        Err(message) => bail!(message),
    };
    print_reading(&reading);
    Ok(())
}

fn print_reading(reading: &Vitals) {
    println!("Reading {} for user {}", reading.id, reading.user_id);
    for kind in VitalKind::ALL {
        println!("  {:<16}{}", kind.label(), kind.format_value(reading.value(kind)));
    }
    println!("  {:<16}{}", "Recorded", format_date(reading.created_at.as_ref(), true));
    println!("  {:<16}{}", "Updated", format_date(reading.updated_at.as_ref(), true));
}

async fn create(context: &Context, args: CreateArgs) -> Result<()> {
    let Some(user_id) = args.user_id.or_else(|| context.auth.user().map(|user| user.id)) else {
        bail!("no user to record the reading for; pass --user-id");
    };
    let request = CreateVitalsRequest {
        temperature: args.temperature,
        humidity: args.humidity,
        pulse_rate: args.pulse_rate,
        light_intensity: args.light_intensity,
        user_id,
    };

    match context.vitals.create(&request).await {
        Ok(reading) => {
            print_reading(&reading);
            Ok(())
        }
        Err(err) => {
            warn!(error = %err, "failed to record vitals");
            bail!(err.user_message(RECORD_FAILED))
        }
    }
}

async fn chart(context: &Context, kind: VitalKind, user_id: Option<u64>) -> Result<()> {
    let readings = match user_id {
        Some(user_id) => context
            .vitals
            .list(&VitalsQuery::for_user(user_id))
            .await
            .map_err(|err| {
                warn!(error = %err, "failed to fetch vitals");
                list_error_message(&err).to_string()
            }),
        None => {
            let scope = VitalsScope::default().with_limit(CHART_WINDOW);
            vitals::load_vitals(&context.vitals, context.auth.user().as_ref(), scope).await
        }
    };
    let readings = match readings {
        Ok(readings) => readings,
        Err(message) => bail!(message),
    };

    println!("{}", render::bar_chart(&chart_series(&readings, kind), kind.unit()));
    Ok(())
}
