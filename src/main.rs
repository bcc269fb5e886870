use anyhow::{anyhow, Result};
use dnsclient::{Config, DnsClient, RecordKind};
use is_terminal::IsTerminal;
use serde_json::{json, Value};
use std::net::IpAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// A lookup result as printable lines and as JSON.
struct Answer {
    lines: Vec<String>,
    json: Value,
}

impl Answer {
    fn values(values: Vec<String>) -> Self {
        let json = json!(values);
        Answer {
            lines: values,
            json,
        }
    }

    fn single(value: String) -> Self {
        let json = json!(value);
        Answer {
            lines: vec![value],
            json,
        }
    }
}

fn main() -> Result<()> {
    tracing_init();

    let mut args = std::env::args();
    let program_name = args.next().unwrap_or("dnsclient".to_string());
    let usage = || {
        anyhow!("usage: {program_name} <a|aaaa|ns|soa|mx|txt|ptr|servers> [name] [config.json]")
    };
    let command = args.next().ok_or_else(usage)?;

    if command == "servers" {
        print_answer(Some(Answer::values(DnsClient::system_name_servers())), "system", "servers");
        return Ok(());
    }

    let kind: RecordKind = command.parse().map_err(|_| usage())?;
    let name = args.next().ok_or_else(usage)?;
    let config = config_init(args.next())?;
    let client = DnsClient::from_config(&config)?;

    let answer = lookup(&client, kind, &name)?;
    print_answer(answer, &name, kind.mnemonic());
    Ok(())
}

fn lookup(client: &DnsClient, kind: RecordKind, name: &str) -> Result<Option<Answer>> {
    let answer = match kind {
        RecordKind::A => client.ipv4_by_host_name(name)?.map(Answer::values),
        RecordKind::Aaaa => client.ipv6_by_host_name(name)?.map(Answer::values),
        RecordKind::Ns => client.name_servers(name)?.map(Answer::values),
        RecordKind::Txt => client.text(name)?.map(Answer::single),
        RecordKind::Ptr => {
            let host_name = match name.parse::<IpAddr>() {
                Ok(addr) => client.host_name_by_addr(addr)?,
                Err(_) => client.host_name_by_ip(name)?,
            };
            host_name.map(Answer::single)
        }
        RecordKind::Soa => match client.soa(name)? {
            Some(soa) => Some(Answer {
                lines: vec![soa.to_string()],
                json: serde_json::to_value(&soa)?,
            }),
            None => None,
        },
        RecordKind::Mx => client.mail_exchanger_servers(name)?.map(|servers| {
            let mut sorted: Vec<(u16, &String)> =
                servers.iter().map(|(host, preference)| (*preference, host)).collect();
            sorted.sort();
            Answer {
                lines: sorted
                    .iter()
                    .map(|(preference, host)| format!("{preference} {host}"))
                    .collect(),
                json: json!(servers),
            }
        }),
    };
    Ok(answer)
}

fn print_answer(answer: Option<Answer>, name: &str, what: &str) {
    let terminal = std::io::stdout().is_terminal();
    match answer {
        Some(answer) if terminal => {
            for line in answer.lines {
                println!("{line}");
            }
        }
        Some(answer) => println!("{}", answer.json),
        None if terminal => eprintln!("no {what} records for {name}"),
        None => println!("null"),
    }
}

fn tracing_init() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dnsclient=warn".into()),
        )
        .init();
}

fn config_init(config_file: Option<String>) -> Result<Config> {
    match config_file {
        None => Ok(Config::default()),
        Some(config_file) => {
            let config = Config::try_from_file(&config_file)?;
            tracing::debug!("loaded config from {config_file}");
            Ok(config)
        }
    }
}
