// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: macbuffers
// File: app.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2022 Volker Schwaberow

use crate::mbt::conformance::{
	run_conformance, ConformanceConfig, DEFAULT_MAX_OFFSET,
	DEFAULT_MESSAGE_LEN,
};
use crate::mbt::mac::registry::{self, MacAlgorithm};
use crate::mbt::random::{fresh_seed, RngType};
use crate::mbt::report::{
	catalog_lines, print_legacy_banner, report_json, report_lines,
	seed_line, SUCCESS_MARKER,
};
use clap::{crate_name, Arg, ArgAction, ArgMatches};
use std::error::Error;

const HELP_TEMPLATE: &str = "{before-help}{name} {version}
Written by {author-with-newline}{about-with-newline}
Feeds a random message through heap, direct and read-only buffer views in
two chunks and checks the MAC matches the one-shot tag.
  mbt HmacMD5 HmacSHA256
  mbt --seed 7 --message-bytes 4096 kmac256
{usage-heading} {usage}

{all-args}{after-help}
";

fn build_cli() -> clap::Command {
	clap::Command::new(crate_name!())
		.color(clap::ColorChoice::Never)
		.help_template(HELP_TEMPLATE)
		.bin_name("mbt")
		.version(clap::crate_version!())
		.author(clap::crate_authors!())
		.about("Streaming MAC update conformance over buffer views")
		.arg(
			Arg::new("algorithm")
				.value_name("ALGORITHM")
				.help("MAC algorithm identifier(s) (e.g., HmacSHA256, kmac128)")
				.num_args(1..)
				.required_unless_present("list"),
		)
		.arg(
			Arg::new("message-bytes")
				.long("message-bytes")
				.value_parser(clap::value_parser!(usize))
				.help("Length of the random message")
				.default_value("10240"),
		)
		.arg(
			Arg::new("key-bytes")
				.long("key-bytes")
				.value_parser(clap::value_parser!(usize))
				.help("Key length (defaults to 16 or the algorithm's fixed length)"),
		)
		.arg(
			Arg::new("max-offset")
				.long("max-offset")
				.value_parser(clap::value_parser!(usize))
				.help("Exclusive bound for the heap slice array offset")
				.default_value("256"),
		)
		.arg(
			Arg::new("seed")
				.long("seed")
				.value_parser(clap::value_parser!(u64))
				.help("Seed for the test-data generator (drawn from OS entropy when absent)"),
		)
		.arg(
			Arg::new("rng")
				.long("rng")
				.value_parser(clap::value_parser!(RngType))
				.help("Generator for message, key, offset and split")
				.default_value("chacha"),
		)
		.arg(
			Arg::new("json")
				.long("json")
				.help("Emit one JSON report per algorithm")
				.action(ArgAction::SetTrue),
		)
		.arg(
			Arg::new("list")
				.long("list")
				.help("List supported MAC algorithms")
				.conflicts_with("algorithm")
				.action(ArgAction::SetTrue),
		)
}

fn config_from_matches(matches: &ArgMatches) -> ConformanceConfig {
	ConformanceConfig {
		message_len: matches
			.get_one::<usize>("message-bytes")
			.copied()
			.unwrap_or(DEFAULT_MESSAGE_LEN),
		key_len: matches.get_one::<usize>("key-bytes").copied(),
		max_offset: matches
			.get_one::<usize>("max-offset")
			.copied()
			.unwrap_or(DEFAULT_MAX_OFFSET),
	}
}

fn handle_run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
	let names: Vec<&String> = matches
		.get_many::<String>("algorithm")
		.map(|values| values.collect())
		.unwrap_or_default();
	// Resolve everything up front so a typo fails before any output.
	let algorithms = names
		.iter()
		.map(|name| registry::lookup(name))
		.collect::<Result<Vec<&'static MacAlgorithm>, _>>()?;

	let config = config_from_matches(matches);
	let rng_type =
		matches.get_one::<RngType>("rng").copied().unwrap_or_default();
	let seed = match matches.get_one::<u64>("seed") {
		Some(seed) => *seed,
		None => fresh_seed()?,
	};
	let json = matches.get_flag("json");
	eprintln!("{}", seed_line(rng_type, seed));

	let mut rng = rng_type.seeded(seed);
	for algorithm in algorithms {
		print_legacy_banner(&algorithm.metadata);
		let report = run_conformance(
			algorithm.metadata.identifier,
			&config,
			rng.as_mut(),
		)?;
		if json {
			println!("{}", report_json(&report, rng_type, seed));
		} else {
			for line in report_lines(&report) {
				println!("{}", line);
			}
		}
	}

	if json {
		eprintln!("{}", SUCCESS_MARKER);
	} else {
		println!("{}", SUCCESS_MARKER);
	}
	Ok(())
}

pub fn run() -> Result<(), Box<dyn Error>> {
	let matches = build_cli().get_matches();
	if matches.get_flag("list") {
		for line in catalog_lines(&registry::metadata()) {
			println!("{}", line);
		}
		return Ok(());
	}
	handle_run(&matches)
}
