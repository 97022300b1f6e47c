mod codec;
mod compare;
mod container;
mod error;
mod huffman;

use std::path::Path;

use anyhow::Context;
use clap::{arg, command, ArgMatches, Command};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = command!()
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("compress")
                .about("Compress a file into a self-contained .huf container")
                .arg(arg!(input: <INPUT> "File to compress"))
                .arg(arg!(output: <OUTPUT> "Compressed output path"))
                .arg(arg!(--codebook [CODEBOOK] "Also write the codebook to this text file")),
        )
        .subcommand(
            Command::new("decompress")
                .about("Restore a file from a .huf container")
                .arg(arg!(input: <INPUT> "Compressed file"))
                .arg(arg!(output: <OUTPUT> "Restored output path"))
                .arg(arg!(--codebook [CODEBOOK] "Decode with this codebook instead of the embedded one")),
        )
        .subcommand(
            Command::new("compare")
                .about("Compare two files byte by byte")
                .arg(arg!(left: <LEFT> "First file"))
                .arg(arg!(right: <RIGHT> "Second file")),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("compress", matches)) => run_compress(matches),
        Some(("decompress", matches)) => run_decompress(matches),
        Some(("compare", matches)) => run_compare(matches),
        _ => unreachable!("a subcommand is required"),
    }
}

fn paths(matches: &ArgMatches, first: &str, second: &str) -> (String, String) {
    let first = matches.get_one::<String>(first).unwrap().clone();
    let second = matches.get_one::<String>(second).unwrap().clone();
    (first, second)
}

fn run_compress(matches: &ArgMatches) -> anyhow::Result<()> {
    let (input, output) = paths(matches, "input", "output");
    let codebook = matches.get_one::<String>("codebook").map(Path::new);

    println!("Compressing {input}...");
    let stats = codec::compress_file(&input, &output, codebook)
        .with_context(|| format!("Couldn't compress {input}"))?;

    println!("{stats}");
    println!("Written to {output}");
    Ok(())
}

fn run_decompress(matches: &ArgMatches) -> anyhow::Result<()> {
    let (input, output) = paths(matches, "input", "output");
    let codebook = matches.get_one::<String>("codebook").map(Path::new);

    println!("Decompressing {input}...");
    let restored = codec::decompress_file(&input, &output, codebook)
        .with_context(|| format!("Couldn't decompress {input}"))?;

    println!("Restored {restored} bytes to {output}");
    Ok(())
}

fn run_compare(matches: &ArgMatches) -> anyhow::Result<()> {
    let (left, right) = paths(matches, "left", "right");

    println!("Verifying...");
    let comparison = compare::compare_files(&left, &right)
        .with_context(|| format!("Couldn't compare {left} with {right}"))?;

    match comparison {
        compare::Comparison::Identical => {
            println!("Success! {left} and {right} are identical.")
        }
        mismatch => println!("Mismatch detected: {mismatch}"),
    }
    Ok(())
}
