// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;

use anyhow::Context;
use namespace_module::config::{load_and_validate_config, RegistryBuilder};
use namespace_module::observability::init_tracing;
use namespace_module::registry::{Invoked, Module, Registry};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <manifest.yaml> [path ...]", args[0]);
        eprintln!("Example: {} configs/todo.yaml", args[0]);
        eprintln!("Example: {} configs/todo.yaml Todo.Models.Task Todo.Version", args[0]);
        std::process::exit(1);
    }

    if let Err(e) = run(&args[1], &args[2..]) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(manifest: &str, paths: &[String]) -> anyhow::Result<()> {
    let config = load_and_validate_config(manifest)
        .with_context(|| format!("loading manifest '{}'", manifest))?;
    init_tracing(config.log_filter.as_deref());

    let registry = RegistryBuilder::from_config(&config)
        .with_context(|| format!("building registry from '{}'", manifest))?;

    println!("Manifest: {}", manifest);
    println!("Registered modules:");
    for (path, kind) in registry.paths() {
        println!("  {:<40} {}", path, kind);
    }

    for path in paths {
        println!();
        describe(&registry, path);
    }

    Ok(())
}

fn describe(registry: &Registry, path: &str) {
    match registry.fetch(path) {
        Some(Module::Verbatim(value)) => println!("{} = {}", path, value),
        Some(module) => println!("{} is a {} module", path, module.kind()),
        None => {
            println!("{}: not found", path);
            return;
        }
    }

    match registry.run(path, vec![]) {
        Some(Invoked::Instance(instance)) => println!("  run -> {:?}", instance),
        Some(Invoked::Returned(Some(module))) => println!("  run -> {:?}", module),
        Some(Invoked::Returned(None)) => println!("  run -> (nothing)"),
        Some(Invoked::Failed(e)) => println!("  run failed: {}", e),
        None => println!("  run -> not callable"),
    }
}
