use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use govlens::config::{self, Config};
use govlens::core::{Action, NotifyLevel};
use govlens::domain::Amount;
use govlens::infrastructure::abi::Keccak256Hasher;
use govlens::infrastructure::CalldataDecoder;
use govlens::modules::dao::DaoOverview;
use govlens::modules::pools::{Paginator, Pool};
use govlens::modules::preview::{preview_actions, preview_call};
use govlens::modules::proposal::Proposal;
use govlens::modules::slider::{label_left_percent, StepSlider};
use govlens::modules::toolkit::{address, describe, selector, timestamp, units, ToolResult};

#[derive(Debug, Parser)]
#[command(
    name = "govlens",
    version,
    about = "Govlens: decode, preview and draft staking DAO proposals"
)]
struct Args {
    /// Config file (defaults to GOVLENS_CONFIG or ~/.config/govlens/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log filter directive (e.g. "govlens=trace"), overrides -v
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decode calldata sent to a known contract
    Decode {
        /// Target contract address
        #[arg(long)]
        target: String,
        calldata: String,
    },
    /// Describe a governable setter call on a configured contract
    Info {
        /// Contract name from the config
        #[arg(long)]
        contract: String,
        calldata: String,
    },
    /// Compute a function selector
    Selector { signature: String },
    /// Checksum and shorten an address
    Checksum { address: String },
    /// Snap a dragged value to an allowed parameter value
    Snap {
        /// Allowed values, comma separated
        #[arg(long, value_delimiter = ',')]
        range: Vec<String>,
        /// Current (on-chain) value
        #[arg(long)]
        current: String,
        /// Contract the parameter belongs to
        #[arg(long, default_value = "Staking")]
        contract: String,
        raw: String,
    },
    /// Clamped label offset along a slider track
    Label {
        /// Thumb position in percent
        percent: f64,
        /// Label width in pixels
        label_width: f64,
        /// Container width in pixels
        container_width: f64,
    },
    /// Show a wei value in Wei / Gwei / DMD
    Units { wei: String },
    /// Format a unix timestamp (UTC)
    Date { timestamp: Option<String> },
    /// Validate a proposal (JSON) and preview its actions
    Propose { proposal: PathBuf },
    /// Governance summary for the connected wallet from a JSON snapshot
    Dao { file: PathBuf },
    /// List validator pools from a JSON file
    Pools {
        file: PathBuf,
        /// Page to show (0-based)
        #[arg(long, default_value_t = 0)]
        page: usize,
        /// Current staking epoch, for claimable withdrawals
        #[arg(long, default_value_t = 0)]
        epoch: u64,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose, args.log.as_deref());

    match run(&args) {
        Ok(actions) => {
            let failed = actions.iter().any(Action::is_error);
            for action in &actions {
                render(action, args.json);
            }
            if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8, directive: Option<&str>) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<Config> {
    match &args.config {
        Some(path) => config::load_from(path),
        None => config::load(),
    }
}

fn run(args: &Args) -> Result<Vec<Action>> {
    let hasher = Keccak256Hasher;

    let action = match &args.command {
        Command::Decode { target, calldata } => {
            let directory = load_config(args)?.directory()?;
            let decoder = CalldataDecoder::new();
            preview_call(&decoder, &directory, target, calldata)
        }
        Command::Info { contract, calldata } => {
            let directory = load_config(args)?.directory()?;
            let deployed = directory
                .by_name(contract)
                .with_context(|| format!("unknown contract {}", contract))?;
            match describe::function_info(&hasher, &deployed.catalog, calldata) {
                Ok(info) => ToolResult::new("Function")
                    .add("name", info.parameter_name)
                    .add("description", info.parameter_description)
                    .into_action(),
                Err(err) => Action::error(err.to_string()),
            }
        }
        Command::Selector { signature } => selector::selector(&hasher, Some(signature.clone())),
        Command::Checksum { address: addr } => address::checksum(Some(addr.clone())),
        Command::Snap {
            range,
            current,
            contract,
            raw,
        } => snap(range, current, contract, raw)?,
        Command::Label {
            percent,
            label_width,
            container_width,
        } => label(*percent, *label_width, *container_width),
        Command::Units { wei } => units::units(Some(wei.clone())),
        Command::Date { timestamp: ts } => timestamp::timestamp(ts.clone()),
        Command::Propose { proposal } => return propose(args, proposal),
        Command::Dao { file } => dao(file)?,
        Command::Pools { file, page, epoch } => {
            let per_page = load_config(args)?.per_page.unwrap_or_default();
            pools(file, per_page, *page, *epoch)?
        }
    };

    Ok(vec![action])
}

fn label(percent: f64, label_width: f64, container_width: f64) -> Action {
    if ![percent, label_width, container_width]
        .iter()
        .all(|value| value.is_finite())
    {
        return Action::error("Label geometry must be finite numbers");
    }
    ToolResult::new("Label")
        .add(
            "left",
            format!(
                "{}%",
                label_left_percent(percent, label_width, container_width)
            ),
        )
        .into_action()
}

fn snap(range: &[String], current: &str, contract: &str, raw: &str) -> Result<Action> {
    let allowed = range
        .iter()
        .map(|value| value.parse::<Amount>())
        .collect::<Result<Vec<_>, _>>()
        .context("parse --range")?;
    let current: Amount = current.parse().context("parse --current")?;
    let raw: Amount = raw.parse().context("parse drag value")?;

    let mut slider = StepSlider::new(contract, allowed, current);
    slider.drag(&raw);
    debug!("snapped {} to {}", raw, slider.value());

    Ok(ToolResult::new("Slider")
        .add("value", slider.value().to_string())
        .add("label", slider.label_text())
        .add("percent", slider.percentage())
        .add("min", slider.min_label())
        .add("max", slider.max_label())
        .into_action())
}

fn propose(args: &Args, path: &Path) -> Result<Vec<Action>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read proposal {}", path.display()))?;
    let proposal: Proposal = serde_json::from_str(&content)
        .with_context(|| format!("parse proposal {}", path.display()))?;
    let directory = load_config(args)?.directory()?;

    let submission = match proposal.submission(&Keccak256Hasher, &directory) {
        Ok(submission) => submission,
        Err(err) => return Ok(vec![Action::error(err.to_string())]),
    };

    let mut summary = ToolResult::new(format!("Proposal ({})", submission.kind))
        .add("Title", submission.title.clone())
        .add("Description", submission.description.clone());
    if !submission.discussion_url.is_empty() {
        summary = summary.add("Discussion URL", submission.discussion_url.clone());
    }

    let actions = &submission.actions;
    for (idx, ((target, value), calldata)) in actions
        .targets
        .iter()
        .zip(&actions.values)
        .zip(&actions.calldatas)
        .enumerate()
    {
        summary = summary.add(
            format!("Transaction {}", idx + 1),
            format!("{} value={} calldata={}", target, value, calldata),
        );
    }

    let mut out = vec![summary.into_action()];
    let decoder = CalldataDecoder::new();
    out.extend(preview_actions(
        &decoder,
        &directory,
        &actions.targets,
        &actions.calldatas,
    ));
    Ok(out)
}

fn dao(path: &Path) -> Result<Action> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read dao snapshot {}", path.display()))?;
    let overview: DaoOverview = serde_json::from_str(&content)
        .with_context(|| format!("parse dao snapshot {}", path.display()))?;

    let mut result = ToolResult::new("Governance")
        .add("Stake", overview.stake_display())
        .add("Weight", format!("{} of total DAO weight", overview.weight_display()))
        .add("Phase", overview.phase_label())
        .add(
            "Create Proposal",
            if overview.can_create_proposal() {
                "available"
            } else {
                "closed"
            },
        );
    if let Some(status) = overview.indexing_status() {
        result = result.add("Historic", status);
    }
    Ok(result.into_action())
}

fn pools(path: &Path, per_page: usize, page: usize, epoch: u64) -> Result<Action> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read pools {}", path.display()))?;
    let pools: Vec<Pool> = serde_json::from_str(&content)
        .with_context(|| format!("parse pools {}", path.display()))?;

    let mut pages = Paginator::new(per_page);
    pages.set_page(page);
    let rows = pages.current_items(&pools);
    if rows.is_empty() {
        return Ok(Action::info(format!(
            "Page {} of {} is empty",
            page.saturating_add(1),
            pages.page_count(pools.len())
        )));
    }

    let mut result = ToolResult::new(format!(
        "Validator Candidates (page {} of {})",
        page.saturating_add(1),
        pages.page_count(pools.len())
    ));
    for pool in rows {
        let mut cells = pool.row();
        cells.push(pool.my_stake_display());
        let actions: Vec<String> = pool
            .row_actions(epoch)
            .iter()
            .map(|action| format!("{:?}", action))
            .collect();
        cells.push(actions.join("/"));
        result = result.add(pool.staking_address.clone(), cells.join(" | "));
    }
    Ok(result.into_action())
}

fn render(action: &Action, json: bool) {
    match action {
        Action::Show { title, rows } if json => {
            let fields: serde_json::Map<String, serde_json::Value> = rows
                .iter()
                .map(|(label, value)| (label.clone(), serde_json::Value::String(value.clone())))
                .collect();
            let value = serde_json::json!({ "title": title, "rows": fields });
            println!("{}", value);
        }
        Action::Show { title, rows } => {
            println!("{}", title);
            let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
            for (label, value) in rows {
                println!("  {:width$}  {}", label, value, width = width);
            }
        }
        Action::Notify(message, level) => {
            let prefix = match level {
                NotifyLevel::Info => "info",
                NotifyLevel::Warn => "warning",
                NotifyLevel::Error => "error",
            };
            eprintln!("{}: {}", prefix, message);
        }
    }
}
