//! agc-loop: run one of the AgC tool-calling examples against a gateway.
//!
//! Usage:
//!   agc-loop file-search                 Remote file-search tool
//!   agc-loop mcp                         Remote MCP tool
//!   agc-loop mcp-bound                   MCP tool through a bound chat model
//!   agc-loop py-fun-tool                 Remote Python function tool
//!   agc-loop local-tool [--max-turns N]  Python tool plus a local tool relay
//!
//! Logs go to stderr and are controlled by `RUST_LOG`.

use agc_loop::client::AgcClient;
use agc_loop::config::AgcConfig;
use agc_loop::conversation::Scenario;
use agc_loop::facade::{run_bound_turn, ChatModel};
use agc_loop::processor::run_single_turn;
use agc_loop::relay::{RelayLoop, DEFAULT_MAX_TURNS};
use agc_loop::tools::{
    allbirds_tool, file_search_tool, python_function_tool, AllbirdsMcp, DiscountPercentage,
    LocalToolRegistry,
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "agc-loop",
    version,
    about = "Tool-calling examples against an AgC chat completion gateway"
)]
struct Cli {
    /// Gateway base URL (overrides AGC_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Model as <provider>@<model-name> (overrides AGC_MODEL)
    #[arg(long, global = true, value_name = "MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Answer a chemistry question with the remote file-search tool
    FileSearch,
    /// Shop for sneakers through the Allbirds MCP server
    Mcp,
    /// Same as `mcp`, with the tool declared as a typed struct and bound to the model
    McpBound,
    /// Apply a discount with a remote Python function
    PyFunTool,
    /// Relay loop with the Python tool and a locally executed discount tool
    LocalTool {
        /// Give up after this many requests
        #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
        max_turns: usize,
    },
}

impl Command {
    fn scenario(self) -> Scenario {
        match self {
            Command::FileSearch => Scenario::FileSearch,
            Command::Mcp => Scenario::Mcp,
            Command::McpBound => Scenario::McpBound,
            Command::PyFunTool => Scenario::PyFunTool,
            Command::LocalTool { .. } => Scenario::LocalTool,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let scenario = cli.command.scenario();

    // Credentials and overrides are checked before anything is printed.
    let config = match resolve_config(&cli, scenario) {
        Ok(config) => config,
        Err(e) => {
            report(&e.into());
            return ExitCode::FAILURE;
        }
    };
    println!("{}", scenario.banner());

    let result = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
        .and_then(|rt| rt.block_on(run(&cli, scenario, config)));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn report(e: &anyhow::Error) {
    let startup = e
        .downcast_ref::<agc_loop::Error>()
        .map(agc_loop::Error::is_startup_failure)
        .unwrap_or(false);
    // Mid-stream failures start on a fresh line.
    let lead = if startup { "" } else { "\n" };
    println!("{}❌ Error: {}", lead, e);
    for cause in e.chain().skip(1) {
        eprintln!("  caused by: {}", cause);
    }
    let _ = io::stdout().flush();
}

fn resolve_config(cli: &Cli, scenario: Scenario) -> agc_loop::Result<AgcConfig> {
    let mut config = AgcConfig::from_env(scenario)?;
    if let Some(url) = &cli.base_url {
        config = config.with_base_url(url)?;
    }
    if let Some(model) = &cli.model {
        config = config.with_model(model)?;
    }
    Ok(config)
}

async fn run(cli: &Cli, scenario: Scenario, config: AgcConfig) -> anyhow::Result<()> {
    debug!(?config, %scenario, "resolved configuration");

    let messages = scenario.messages();
    let stdout = io::stdout();

    match cli.command {
        Command::FileSearch | Command::Mcp | Command::PyFunTool => {
            let tools = match cli.command {
                Command::FileSearch => vec![file_search_tool(&config)],
                Command::PyFunTool => vec![python_function_tool(&config)],
                _ => vec![allbirds_tool()],
            };
            let client = AgcClient::new(&config)?;
            run_single_turn(&client, scenario.title(), &messages, &tools, stdout.lock()).await?;
        }
        Command::McpBound => {
            let model = ChatModel::from_config(&config)?
                .bind_tools(&[AllbirdsMcp])
                .tool_choice(None);
            run_bound_turn(&model, scenario.title(), &messages, stdout.lock()).await?;
        }
        Command::LocalTool { max_turns } => {
            let client = AgcClient::new(&config)?;
            let mut out = stdout.lock();
            writeln!(out, "\n{}", scenario.title())?;
            writeln!(out, "Sending streaming request to AgC API...")?;
            writeln!(out, "Model: {}", config.model)?;
            writeln!(out, "\n--- SDK Streaming Response ---")?;

            let registry = LocalToolRegistry::new().register(DiscountPercentage::new());
            let mut tools = vec![python_function_tool(&config)];
            tools.extend(registry.definitions());
            let relay = RelayLoop::new(tools, registry).max_turns(max_turns);
            let outcome = relay.run(&client, messages, &mut out).await?;
            debug!(turns = outcome.turns, messages = outcome.messages.len(), "relay finished");
            writeln!(out, "\n--- ✅ Streaming Complete ---")?;
        }
    }

    Ok(())
}
