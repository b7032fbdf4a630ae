//! Prints the name, super class and version of a compiled class file.

use std::{error::Error, fs::File, io, path::PathBuf, process};

use clap::Parser;
use classpeek_class_file::{decode_class_identity, ClassIdentity, DecodeError};
use memmap::Mmap;

#[derive(Parser, Debug)]
#[command(version, about = "Reads the identity of a compiled class file")]
struct Cli {
    /// Class file to read
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Also print the access flags and every constant pool slot
    #[arg(long)]
    dump: bool,
}

fn main() {
    pretty_env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        log::error!("{}: {}", cli.path.display(), e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let file = File::open(&cli.path)?;

    // Mapping an empty file fails, so decode it from an empty reader instead.
    let class_file = if file.metadata()?.len() == 0 {
        decode_class_identity(io::empty())?
    } else {
        let mmap = unsafe { Mmap::map(&file)? };
        decode_class_identity(&mmap[..])?
    };
    log::debug!("decoded {}", cli.path.display());

    // Both names are resolved before anything is printed.
    let mut lines = identity_lines(&class_file)?;
    if cli.dump {
        lines.extend(dump_lines(&class_file));
    }
    lines.iter().for_each(|line| println!("{}", line));

    Ok(())
}

fn identity_lines(class_file: &ClassIdentity) -> Result<Vec<String>, DecodeError> {
    let name = class_file.canonical_name()?;
    let super_name = match class_file.header().super_class {
        0 => None,
        _ => Some(class_file.superclass_canonical_name()?),
    };

    Ok(vec![
        format!("Class:       {}", name),
        format!("Super class: {}", super_name.unwrap_or("<none>")),
        format!(
            "Version:     {}.{}",
            class_file.major_version(),
            class_file.minor_version()
        ),
    ])
}

fn dump_lines(class_file: &ClassIdentity) -> Vec<String> {
    let mut lines = vec![
        format!("Flags:       {:?}", class_file.access_flags()),
        String::new(),
        "Constant pool:".to_owned(),
    ];
    lines.extend(
        class_file
            .constant_pool()
            .iter()
            .map(|(index, entry)| match entry {
                Some(entry) => format!("[{}] {}", index, entry),
                None => format!("[{}] (unusable)", index),
            }),
    );
    lines
}
