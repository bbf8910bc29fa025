use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use crate::app_state::AppState;
use crate::config_loader::{load_config, GatewayConfig};
use crate::form_controller::{FormState, PredictionController};
use crate::presets::{self, PRESETS};
use crate::proxy_client::ProxyClient;
use crate::proxyweb::build_router;
use crate::render::{render_features, render_metrics, render_presets, render_result};
use crate::reservoir::{FieldStage, FormField};

/// Top-level CLI interface for the fracture-flooding gateway
#[derive(Parser)]
#[command(
    name = "fracflood",
    version,
    about = "Fracture-flooding suitability gateway and client"
)]
pub struct Cli {
    /// Path to a TOML config file (defaults to FRACFLOOD_CONFIG or fracflood.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the HTTP gateway (predict proxy, test proxy, health)
    Serve {
        /// Host/IP to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to bind
        #[arg(long)]
        port: Option<u16>,
    },

    /// Submit reservoir parameters through a running gateway
    Predict(PredictArgs),

    /// Load test data and evaluate the model through a running gateway
    Evaluate {
        #[arg(long)]
        limit: Option<u32>,
        /// Gateway base URL (defaults to the configured local port)
        #[arg(long)]
        gateway: Option<String>,
    },

    /// List the built-in sample reservoirs
    Presets,

    /// Print the effective configuration as TOML
    Config,
}

/// Numeric values are taken as typed; anything unparseable is sent as 0.
#[derive(Args)]
pub struct PredictArgs {
    /// Start from a sample reservoir (see `presets`)
    #[arg(long)]
    pub preset: Option<String>,
    #[arg(long)]
    pub porosity: Option<String>,
    #[arg(long)]
    pub water_saturation: Option<String>,
    #[arg(long)]
    pub oil_saturation: Option<String>,
    #[arg(long)]
    pub depth: Option<String>,
    #[arg(long)]
    pub net_pay: Option<String>,
    #[arg(long)]
    pub reservoir_pressure: Option<String>,
    #[arg(long)]
    pub viscosity: Option<String>,
    #[arg(long)]
    pub permeability: Option<String>,
    /// early, appraisal or developed
    #[arg(long)]
    pub stage: Option<FieldStage>,
    /// Gateway base URL (defaults to the configured local port)
    #[arg(long)]
    pub gateway: Option<String>,
}

impl PredictArgs {
    pub fn form_state(&self) -> anyhow::Result<FormState> {
        let mut form = match &self.preset {
            Some(name) => match presets::find(name) {
                Some(preset) => FormState::from_features(&preset.features),
                None => bail!("unknown preset '{name}'"),
            },
            None => FormState::default(),
        };

        let overrides = [
            (FormField::Porosity, &self.porosity),
            (FormField::WaterSaturation, &self.water_saturation),
            (FormField::OilSaturation, &self.oil_saturation),
            (FormField::Depth, &self.depth),
            (FormField::NetPay, &self.net_pay),
            (FormField::ReservoirPressure, &self.reservoir_pressure),
            (FormField::Viscosity, &self.viscosity),
            (FormField::Permeability, &self.permeability),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                form.set(field, value.clone());
            }
        }
        if let Some(stage) = self.stage {
            form.field_stage = stage;
        }
        Ok(form)
    }
}

fn gateway_url(explicit: Option<&str>, config: &GatewayConfig) -> String {
    explicit
        .map(str::to_owned)
        .unwrap_or_else(|| format!("http://127.0.0.1:{}", config.port))
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?;

    match cli.command {
        Commands::Presets => {
            print!("{}", render_presets(&PRESETS));
            Ok(())
        }
        Commands::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            block_on(serve(config))
        }
        Commands::Predict(args) => block_on(predict(args, config)),
        Commands::Evaluate { limit, gateway } => {
            let limit = limit.unwrap_or(config.default_test_limit);
            block_on(evaluate(gateway_url(gateway.as_deref(), &config), limit, &config))
        }
    }
}

fn block_on<F: std::future::Future<Output = anyhow::Result<()>>>(fut: F) -> anyhow::Result<()> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;
    rt.block_on(fut)
}

async fn serve(config: GatewayConfig) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    let state = AppState::shared(config)?;
    info!(upstream = state.upstream.base_url(), "prediction service configured");

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("HTTP server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

async fn predict(args: PredictArgs, config: GatewayConfig) -> anyhow::Result<()> {
    let form = args.form_state()?;
    for field in form.coerced_fields() {
        eprintln!(
            "warning: {} value '{}' is not a number; sending 0",
            field.label(),
            form.get(field)
        );
    }

    let client = ProxyClient::new(
        gateway_url(args.gateway.as_deref(), &config),
        config.request_timeout(),
    )?;
    println!("Reservoir parameters:");
    print!("{}", render_features(&form.to_features()));
    println!();

    let controller = PredictionController::new(client);
    let outcome = controller.submit(&form).await;
    print!("{}", render_result(&outcome.display_result()));
    if !outcome.is_success() {
        bail!("prediction failed");
    }
    Ok(())
}

async fn evaluate(gateway: String, limit: u32, config: &GatewayConfig) -> anyhow::Result<()> {
    let client = ProxyClient::new(gateway, config.request_timeout())?;

    let dataset = client
        .load_test_data(limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load test data: {}", e.user_message()))?;
    info!(cases = dataset.test_cases.len(), "loaded test data");

    let metrics = client
        .evaluate(&dataset)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to evaluate model: {}", e.user_message()))?;

    println!(
        "Evaluation at {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
    print!("{}", render_metrics(&metrics));
    if !metrics.is_consistent() {
        warn!(
            total_cases = metrics.total_cases,
            matrix_total = metrics.confusion_matrix.total(),
            "confusion matrix does not add up to total_cases"
        );
    }
    Ok(())
}
