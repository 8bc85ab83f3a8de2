use std::env;
use std::error::Error;
use std::process;

use dnswalk::{QueryType, Resolver, UdpTransport};
use log::{error, info};

const USAGE: &str = "usage: dnswalk <name> [A|NS]";

/// Splits the command line into the name and the query type, A by default
fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<(String, QueryType), String> {
    let name = args.next().ok_or_else(|| USAGE.to_owned())?;
    let qtype = match args.next() {
        None => QueryType::A,
        Some(arg) => arg
            .parse::<QueryType>()
            .map_err(|err| format!("{}\n{}", err, USAGE))?,
    };
    if args.next().is_some() {
        return Err(USAGE.to_owned());
    }
    Ok((name, qtype))
}

pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("dnswalk=info"))
        .init();

    let (name, qtype) = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            process::exit(2);
        }
    };

    let mut resolver = Resolver::new(UdpTransport::new());
    match resolver.resolve(&name, qtype) {
        Ok(answer) => {
            info!("{} {} {}", name, qtype, answer);
            println!("{}", answer);
        }
        Err(err) => {
            let mut message = err.to_string();
            let mut source = err.source();
            while let Some(cause) = source {
                message.push_str(": ");
                message.push_str(&cause.to_string());
                source = cause.source();
            }
            error!("{}", message);
            process::exit(1);
        }
    }
}
