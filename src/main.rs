use clap::{Parser, ValueEnum};
use inventory_mc::analysis::stats::{aggregate, batch_observations, summarize_batch, Metric, Selection};
use inventory_mc::io::reporting;
use inventory_mc::{
    run_simulation, DemandModel, ReplenishmentMode, RunConfig, Scenario, SimulationParameters,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScenarioArg {
    /// 30 days, one trial, unlimited backorder
    Inventory,
    /// 365 days, 2000 trials, sales capped by stock
    SalesMax,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DemandArg {
    UniformApprox,
    TrueNormal,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReplenishmentArg {
    Instant,
    LeadTime,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MetricArg {
    Demand,
    Inventory,
    TotalCost,
    CumulativeSales,
}

#[derive(Debug, Parser)]
#[command(name = "inventory-mc", about = "Monte Carlo simulation of a reorder-point inventory policy")]
struct Cli {
    #[arg(long, value_enum, default_value = "inventory")]
    scenario: ScenarioArg,

    /// Days per trial (defaults to the scenario's horizon)
    #[arg(long)]
    horizon: Option<usize>,

    /// Number of trials (defaults to the scenario's trial count)
    #[arg(long)]
    trials: Option<usize>,

    /// Batch seed; omit for a fresh one
    #[arg(long)]
    seed: Option<u64>,

    /// JSON parameter record (camelCase fields)
    #[arg(long)]
    params: Option<PathBuf>,

    #[arg(long)]
    mean_demand: Option<f64>,
    #[arg(long)]
    std_demand: Option<f64>,
    #[arg(long)]
    order_cost: Option<f64>,
    #[arg(long)]
    holding_cost: Option<f64>,
    #[arg(long)]
    shortage_cost: Option<f64>,
    #[arg(long)]
    lead_time: Option<u32>,
    #[arg(long)]
    max_inventory: Option<f64>,
    #[arg(long)]
    reorder_point: Option<f64>,

    #[arg(long, value_enum, default_value = "uniform-approx")]
    demand_model: DemandArg,

    #[arg(long, value_enum, default_value = "instant")]
    replenishment: ReplenishmentArg,

    /// Also report this metric over every day of every trial
    #[arg(long, value_enum)]
    metric: Option<MetricArg>,

    /// Write the daily records as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write records and summary as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

impl Cli {
    fn parameters(&self) -> inventory_mc::Result<SimulationParameters> {
        let mut params = match &self.params {
            Some(path) => SimulationParameters::from_json_file(path)?,
            None => SimulationParameters::default(),
        };

        if let Some(v) = self.mean_demand {
            params.mean_demand = v;
        }
        if let Some(v) = self.std_demand {
            params.std_demand = v;
        }
        if let Some(v) = self.order_cost {
            params.order_cost = v;
        }
        if let Some(v) = self.holding_cost {
            params.holding_cost = v;
        }
        if let Some(v) = self.shortage_cost {
            params.shortage_cost = v;
        }
        if let Some(v) = self.lead_time {
            params.lead_time = v;
        }
        if let Some(v) = self.max_inventory {
            params.max_inventory = v;
        }
        if let Some(v) = self.reorder_point {
            params.reorder_point = v;
        }
        Ok(params)
    }

    fn run_config(&self) -> RunConfig {
        let scenario = match self.scenario {
            ScenarioArg::Inventory => Scenario::Inventory,
            ScenarioArg::SalesMax => Scenario::SalesMax,
        };
        let mut config = RunConfig::for_scenario(scenario);
        if let Some(h) = self.horizon {
            config.horizon = h;
        }
        if let Some(n) = self.trials {
            config.trials = n;
        }
        config.seed = self.seed;
        config.demand_model = match self.demand_model {
            DemandArg::UniformApprox => DemandModel::UniformApprox,
            DemandArg::TrueNormal => DemandModel::TrueNormal,
        };
        config.replenishment = match self.replenishment {
            ReplenishmentArg::Instant => ReplenishmentMode::Instant,
            ReplenishmentArg::LeadTime => ReplenishmentMode::LeadTime,
        };
        config
    }
}

fn run(cli: &Cli) -> inventory_mc::Result<()> {
    println!("=== Inventory Monte Carlo Simulation ===");

    // 1. SETUP CONFIGURATION
    let params = cli.parameters()?;
    let config = cli.run_config();
    println!(
        "Demand: {:.1} ± {:.1} ({:?}) | Reorder at {:.0}, up to {:.0} | Lead time: {} days ({:?})",
        params.mean_demand,
        params.std_demand,
        config.demand_model,
        params.reorder_point,
        params.max_inventory,
        params.lead_time,
        config.replenishment
    );

    // 2. RUN SIMULATION
    println!(
        "Running {} trial(s) of {} days...",
        config.trials, config.horizon
    );
    let batch = run_simulation(&params, &config)?;

    // 3. ANALYZE
    let summary = summarize_batch(&batch)?;
    if let [only] = batch.trials.as_slice() {
        reporting::display_trial_table(only);
    }
    reporting::display_summary(&summary);

    if let Some(metric) = cli.metric {
        let metric = match metric {
            MetricArg::Demand => Metric::Demand,
            MetricArg::Inventory => Metric::Inventory,
            MetricArg::TotalCost => Metric::TotalCost,
            MetricArg::CumulativeSales => Metric::CumulativeSales,
        };
        let xs = batch_observations(&batch, metric, Selection::AllDays);
        let stats = aggregate(&xs)?;
        reporting::display_metric(&format!("{} (all days)", metric.label()), &stats);
    }

    // 4. EXPORT RESULTS
    if let Some(path) = &cli.csv {
        reporting::write_simulation_log(path, &batch)?;
        println!("Success! Records written to {}", path.display());
    }
    if let Some(path) = &cli.json {
        reporting::write_report_json(path, &batch, &summary)?;
        println!("Success! Report written to {}", path.display());
    }

    println!("\nSimulation Complete.");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
