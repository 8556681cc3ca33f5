//! favhash 命令行入口

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use favhash::{
    AnalysisReport, ConfigManager, FaviconAnalyzer, GlobalConfig, LocatorConfig, ProbeMethod,
    ShodanClient,
};

/// 网站 favicon 定位、MMH3 指纹计算与 Shodan 同源资产检索
#[derive(Debug, Parser)]
#[command(name = "favhash", version, about)]
struct Cli {
    /// 目标站点（缺省协议时补全为 https://）
    target: String,

    /// Shodan API Key
    #[arg(short = 'k', long = "key", env = "SHODAN_API_KEY", hide_env_values = true)]
    key: Option<String>,

    /// 只计算指纹，不检索 Shodan
    #[arg(long = "hash")]
    hash_only: bool,

    /// 启用 Web App Manifest 定位策略
    #[arg(long)]
    manifest: bool,

    /// 用 HEAD 请求校验候选地址
    #[arg(long)]
    head: bool,

    /// 请求超时（秒）
    #[arg(short = 't', long, default_value_t = 10)]
    timeout: u64,

    /// 以 JSON 输出结果
    #[arg(long)]
    json: bool,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn to_config(&self) -> GlobalConfig {
        let mut locator = LocatorConfig::default();
        if self.manifest {
            locator = locator.with_manifest();
        }
        if self.head {
            locator = locator.with_probe_method(ProbeMethod::Head);
        }

        ConfigManager::custom()
            .http_timeout(self.timeout)
            .verbose(self.verbose)
            .locator(locator)
            .build()
    }
}

#[cfg(feature = "logging")]
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "favhash=debug" } else { "favhash=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(not(feature = "logging"))]
fn init_logging(_verbose: bool) {}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.to_config();
    init_logging(config.verbose);

    let key = cli.key.as_deref().filter(|k| !k.trim().is_empty());
    if !cli.hash_only && key.is_none() {
        eprintln!("[-] Error: Shodan API key is required for searching. Use -k to provide it.");
        eprintln!("[!] Tip: Use --hash if you only want to calculate the hash.");
        return ExitCode::FAILURE;
    }

    match run(&cli, &config, key).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[-] Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, config: &GlobalConfig, key: Option<&str>) -> Result<()> {
    let analyzer = FaviconAnalyzer::from_config(config).context("failed to build HTTP client")?;

    let shodan = match key {
        Some(key) if !cli.hash_only => Some(ShodanClient::new(key, config)?),
        _ => None,
    };

    let report = analyzer
        .analyze(&cli.target, shodan.as_ref())
        .await
        .with_context(|| format!("analysis of {} failed", cli.target))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &AnalysisReport) {
    println!("[*] Target URL: {}", report.target);

    if let Some(info) = &report.api_info {
        println!();
        println!("[+] API Key Information:");
        println!("    Plan: {}", info.plan);
        println!("    Query Credits: {}", info.query_credits);
        println!("    Scan Credits: {}", info.scan_credits);
        if info.is_limited() {
            println!("[!] Warning: You are using a free/dev API key. Results might be limited.");
        }
    }

    println!();
    println!("[+] Found favicon at: {}", report.favicon_url);
    println!("[+] Favicon MMH3 hash: {}", report.hash);

    let Some(search) = &report.search else {
        return;
    };

    if report.limited_plan_hint {
        println!();
        println!("[!] No results found. This might be due to API key limitations.");
        println!("[!] Try searching for this hash manually on Shodan: {}", report.shodan_query);
        return;
    }

    println!("[+] Found {} matches", search.total);
    if search.matches.is_empty() {
        return;
    }

    println!();
    println!("[+] Results:");
    for host in &search.matches {
        println!();
        println!("    IP: {}", host.ip);
        println!("    Port: {}", host.port);
        if !host.hostnames.is_empty() {
            println!("    Hostnames: {}", host.hostnames.join(", "));
        }
        if !host.domains.is_empty() {
            println!("    Domains: {}", host.domains.join(", "));
        }
        println!(
            "    Location: {}, {}",
            host.location.city.as_deref().unwrap_or("-"),
            host.location.country.as_deref().unwrap_or("-")
        );
        println!("    ---");
    }
}
