use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use kpi_dash::config::DashboardConfig;
use kpi_dash::dashboard::{AnalysisMode, Dashboard, Panel, Selection};
use kpi_dash::dataset::DatasetCache;
use kpi_dash::export;
use kpi_dash::report;
use kpi_dash::synthetic::{self, ScenarioLabel, SyntheticTotals};

#[derive(Parser)]
#[command(name = "kpi-dash", about = "E-commerce KPI projection dashboards")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct Controls {
    /// Pipeline dataset (JSON); overrides the config file
    #[arg(long)]
    data: Option<PathBuf>,

    /// Dashboard config (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lower bound of the annual spend range ($M)
    #[arg(long)]
    min_spend: Option<u64>,

    /// Upper bound of the annual spend range ($M)
    #[arg(long)]
    max_spend: Option<u64>,

    /// Minimum blended ROAS (0, 1, 1.5, 2, 2.5, 3, 3.5 or 4)
    #[arg(long, default_value = "0")]
    min_roas: f64,

    /// Also write the dashboard page to this HTML file
    #[arg(long)]
    html: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Annual performance overview
    Overview {
        #[command(flatten)]
        controls: Controls,
    },

    /// Marginal returns and ROAS threshold crossings
    Marginal {
        #[command(flatten)]
        controls: Controls,
    },

    /// Side-by-side comparison of up to three spend levels
    Compare {
        #[command(flatten)]
        controls: Controls,

        /// Annual spend to compare ($M), repeat up to three times
        #[arg(long = "spend")]
        spends: Vec<f64>,
    },

    /// Formatted data table
    Table {
        #[command(flatten)]
        controls: Controls,
    },

    /// Export the filtered data table as a date-stamped CSV
    Export {
        #[command(flatten)]
        controls: Controls,

        /// Output directory for the CSV file
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,
    },

    /// Render the synthetic monthly financials dashboard
    Synthetic {
        /// Scenario label shown in titles
        #[arg(long, value_enum, default_value = "baseline")]
        scenario: ScenarioLabel,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Output HTML file
        #[arg(long, default_value = "output/scenarios_2026.html")]
        html: PathBuf,
    },
}

fn open_dashboard(controls: &Controls) -> Result<Dashboard> {
    let mut config = DashboardConfig::load_or_default(controls.config.as_deref())
        .context("loading dashboard config")?;
    if let Some(data) = &controls.data {
        config.data_path = data.clone();
    }
    let cache = DatasetCache::new(config.data_path.clone());
    let dataset = cache.get_or_load()?;
    Ok(Dashboard::new(dataset, config))
}

fn selection_for(dashboard: &Dashboard, controls: &Controls, mode: AnalysisMode) -> Selection {
    let mut selection = dashboard.default_selection(mode);
    if let Some(lo) = controls.min_spend {
        selection.spend_millions.0 = lo;
    }
    if let Some(hi) = controls.max_spend {
        selection.spend_millions.1 = hi;
    }
    selection.min_roas = controls.min_roas;
    selection
}

fn run_mode(controls: &Controls, mode: AnalysisMode, spends: Vec<f64>) -> Result<()> {
    let dashboard = open_dashboard(controls)?;
    let mut selection = selection_for(&dashboard, controls, mode);
    selection.comparison_millions = spends;

    let view = dashboard.interact(&selection)?;
    print!("{}", report::render_text(&view));

    if let Some(path) = &controls.html {
        let html = report::render_dashboard(&view, dashboard.config())?;
        report::save_report(&html, path)?;
        println!("\nDashboard: {}", path.display());
    }
    Ok(())
}

fn run_export(controls: &Controls, output_dir: &Path) -> Result<()> {
    let dashboard = open_dashboard(controls)?;
    let selection = selection_for(&dashboard, controls, AnalysisMode::DataTable);
    let view = dashboard.interact(&selection)?;

    match view.panel {
        Panel::Table { table, .. } => {
            let today = chrono::Local::now().date_naive();
            let path = export::save_csv(&table, output_dir, today)?;
            println!("Saved {} rows to {}", table.rows.len(), path.display());
        }
        Panel::Empty { message } => println!("{}", message),
        _ => {}
    }
    Ok(())
}

fn run_synthetic(label: ScenarioLabel, seed: u64, html: &Path) -> Result<()> {
    let rows = synthetic::generate_monthly(seed);
    let totals = SyntheticTotals::from_rows(&rows);
    println!(
        "{} scenario: {} months, revenue={}, costs={}, profit={}",
        label,
        rows.len(),
        totals.revenue,
        totals.costs,
        totals.profit
    );
    let page = report::render_synthetic(label, &rows);
    report::save_report(&page, html)?;
    println!("Dashboard: {}", html.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Overview { controls } => {
            run_mode(&controls, AnalysisMode::AnnualOverview, Vec::new())
        }
        Commands::Marginal { controls } => {
            run_mode(&controls, AnalysisMode::MarginalReturns, Vec::new())
        }
        Commands::Compare { controls, spends } => {
            run_mode(&controls, AnalysisMode::ScenarioComparison, spends)
        }
        Commands::Table { controls } => run_mode(&controls, AnalysisMode::DataTable, Vec::new()),
        Commands::Export {
            controls,
            output_dir,
        } => run_export(&controls, &output_dir),
        Commands::Synthetic {
            scenario,
            seed,
            html,
        } => run_synthetic(scenario, seed, &html),
    }
}
