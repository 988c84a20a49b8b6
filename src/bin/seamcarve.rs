// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{value_t, App, Arg, ArgMatches};
use image::GrayImage;
use log::info;
use seamcarve::{energy_to_image, Carve, CarveError, CarveObserver, EnergyGrid, SeamCarver};
use std::cmp;
use std::fs;
use std::path::PathBuf;
use std::process;

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("seamcarve")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware image shrinking by seam carving")
        .arg(
            Arg::with_name("in")
                .short("i")
                .long("in")
                .value_name("FILE")
                .help("The image to carve")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("out")
                .short("o")
                .long("out")
                .value_name("FILE")
                .help("Where to write the carved image")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("columns")
                .short("c")
                .long("remove-n-cols")
                .value_name("N")
                .help("Number of columns to remove")
                .takes_value(true)
                .default_value("0"),
        )
        .arg(
            Arg::with_name("rows")
                .short("r")
                .long("remove-n-rows")
                .value_name("N")
                .help("Number of rows to remove")
                .takes_value(true)
                .default_value("0"),
        )
        .arg(
            Arg::with_name("energy")
                .short("e")
                .long("energy-map")
                .value_name("FILE")
                .help("Also write the first energy map, as greyscale")
                .takes_value(true),
        )
}

struct Options {
    input: PathBuf,
    output: PathBuf,
    columns: u32,
    rows: u32,
    energy_map: Option<PathBuf>,
}

impl Options {
    fn from_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        Ok(Options {
            input: matches.value_of_os("in").map(PathBuf::from).unwrap_or_default(),
            output: matches.value_of_os("out").map(PathBuf::from).unwrap_or_default(),
            columns: value_t!(matches, "columns", u32)?,
            rows: value_t!(matches, "rows", u32)?,
            energy_map: matches.value_of_os("energy").map(PathBuf::from),
        })
    }
}

// Logs each tenth of a phase, and keeps the first energy map if asked.
struct Progress {
    keep_energy: bool,
    energy: Option<GrayImage>,
}

impl CarveObserver for Progress {
    fn energy_map(&mut self, energy: &EnergyGrid) {
        if self.keep_energy {
            self.energy = Some(energy_to_image(energy));
        }
    }

    fn seam_removed(&mut self, direction: Carve, done: u32, total: u32) {
        let step = cmp::max(total / 10, 1);
        if done % step == 0 || done == total {
            let what = match direction {
                Carve::Width => "columns",
                Carve::Height => "rows",
            };
            info!("Removing {}: {}/{}", what, done, total);
        }
    }
}

fn run(options: &Options) -> Result<(), failure::Error> {
    let image = image::open(&options.input)?.to_rgb();
    if options.columns == 0 && options.rows == 0 {
        info!("nothing to remove, {} not written", options.output.display());
        return Ok(());
    }

    let mut progress = Progress {
        keep_energy: options.energy_map.is_some(),
        energy: None,
    };
    let carved = SeamCarver::new(&image).carve(options.columns, options.rows, &mut progress)?;

    // The energy map goes first: a run that fails leaves neither file.
    let energy_path = match (&options.energy_map, &progress.energy) {
        (Some(path), Some(energy)) => {
            energy.save(path)?;
            info!("Energy map saved to {}", path.display());
            Some(path)
        }
        _ => None,
    };
    if let Err(err) = carved.save(&options.output) {
        if let Some(path) = energy_path {
            let _ = fs::remove_file(path);
        }
        return Err(err.into());
    }
    println!("Image saved to {}", options.output.display());
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = app().get_matches();
    let options = Options::from_matches(&matches).unwrap_or_else(|e| e.exit());
    if let Err(err) = run(&options) {
        eprintln!("seamcarve: {}", err);
        let bad_input = err
            .downcast_ref::<CarveError>()
            .map_or(false, CarveError::is_invalid_image);
        if bad_input {
            eprintln!("seamcarve: {} is not a carvable image", options.input.display());
        }
        process::exit(1);
    }
}
