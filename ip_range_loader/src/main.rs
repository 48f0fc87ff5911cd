// Copyright (c) 2024, MASQ (https://masq.ai) and/or its affiliates. All rights reserved.

use ip_range_loader_lib::ip_range_loader::ip_range_loader;
use ip_range_loader_lib::loader_config::LoaderConfig;
use ip_range_loader_lib::logger::start_logging;
use std::env;
use std::ffi::OsString;
use std::io;
use std::process;

pub fn main() {
    let args: Vec<OsString> = env::args_os().collect();
    let env_vars = env::vars_os()
        .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)));
    let config = LoaderConfig::from_env_vars(env_vars);
    let _logger_handle = config.as_ref().ok().and_then(|config| {
        start_logging(config.log_level)
            .map_err(|e| eprintln!("Logging subsystem failed to start: {}", e))
            .ok()
    });
    process::exit(ip_range_loader(
        &args,
        &mut io::stdout(),
        &mut io::stderr(),
        config,
    ))
}
