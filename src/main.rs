#![deny(warnings)]

extern crate arithc;
extern crate clap;

use std::env;
use std::fs::{File, read_to_string};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;
use std::process::{Command, Stdio, exit};

use clap::{Arg, App};

use arithc::c::emit_c;
use arithc::config::{Backend, Config};
use arithc::driver::{front_end, translate};
use arithc::host::run_module;
use arithc::interpreter::int_pow;
use arithc::lexer::lex;
use arithc::wat::emit_wat;


const DEFAULT_CONFIG_PATH: &str = "arithc.toml";

fn run_cmd(cmd: &str, args: &[String], verbose: bool) -> std::io::Result<()> {
    if verbose {
        eprintln!("{} {:?}", cmd, args);
    }

    let output = Command::new(cmd)
        .args(args)
        .stderr(Stdio::inherit())
        .stdout(Stdio::inherit())
        .output()?;

    if !output.status.success() {
        eprintln!("command {} failed", cmd);
        exit(1);
    }

    return Ok(());
}


fn cc_args<'a>(
    cfg: &'a Config,
    c_file: &'a str,
    out_file: &'a str
) -> Vec<String> {
    let mut args: Vec<String> = Vec::new();
    args.push(c_file.to_string());
    args.push("-o".to_string());
    args.push(out_file.to_string());
    args.extend(cfg.c.cc_args.clone());
    args
}


fn load_config(explicit_path: Option<&str>) -> Config {
    let config_path = match explicit_path {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => DEFAULT_CONFIG_PATH,
        None => return Config::default(),
    };

    let config_str = read_to_string(config_path).unwrap_or_else(|err| {
        eprintln!("could not read config file: {}", err);
        exit(1);
    });
    Config::from_toml(&config_str).unwrap_or_else(|err| {
        eprintln!("incorrect configuration: {}", err);
        exit(1);
    })
}


fn read_input(input_path: Option<&str>) -> io::Result<String> {
    if let Some(path) = input_path {
        return Ok(read_to_string(path).unwrap_or_else(|err| {
            eprintln!("could not read source file: {}", err);
            exit(1);
        }));
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        print!("> ");
        io::stdout().flush()?;
    }
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    Ok(line)
}


fn write_output(text: &str, output_path: Option<&str>) -> io::Result<()> {
    match output_path {
        Some(path) => {
            let mut outfile = File::create(path)?;
            outfile.write_all(text.as_bytes())
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(text.as_bytes())
        }
    }
}


fn main() -> std::io::Result<()> {
    let arg_matches = App::new("arithc")
        .about("Compiler for a small arithmetic expression language")
        .arg(Arg::with_name("config")
             .short("c")
             .long("config")
             .value_name("FILE")
             .help("Compiler config TOML file")
             .takes_value(true))
        .arg(Arg::with_name("INPUT")
            .help("Source file, one line is read from stdin when absent")
            .index(1))
        .arg(Arg::with_name("backend")
             .short("b")
             .long("backend")
             .value_name("BACKEND")
             .possible_values(Backend::NAMES)
             .help("Translation backend")
             .takes_value(true))
        .arg(Arg::with_name("output")
             .short("o")
             .long("output")
             .value_name("FILE")
             .help("Output file path")
             .takes_value(true))
        .arg(Arg::with_name("run")
             .short("r")
             .long("run")
             .help("Execute the translated program"))
        .arg(Arg::with_name("verbose")
             .short("v")
             .long("verbose")
             .help("Verbose output"))
        .get_matches();

    let verbose = arg_matches.occurrences_of("verbose") > 0;
    let output_path = arg_matches.value_of("output");

    let config = load_config(arg_matches.value_of("config"));
    let backend = match arg_matches.value_of("backend") {
        Some(name) => name.parse::<Backend>().unwrap_or_else(|err| {
            eprintln!("{}", err);
            exit(1);
        }),
        None => config.backend,
    };

    let input = read_input(arg_matches.value_of("INPUT"))?;

    if verbose {
        eprintln!("Tokens: {:?}", lex(&input));
    }

    let prog = front_end(&input).unwrap_or_else(|err| {
        eprintln!("{}", err);
        exit(1);
    });
    if verbose {
        eprintln!("Parse: {:?}", prog);
    }

    if arg_matches.is_present("run") {
        match backend {
            Backend::Wat => {
                let module = emit_wat(&prog);
                let result = run_module(&module, &int_pow).unwrap_or_else(|err| {
                    eprintln!("could not run module: {}", err);
                    exit(1);
                });
                return write_output(&format!("{}\n", result), output_path);
            }
            Backend::C => {
                let base_path = output_path.unwrap_or("a.out");
                let c_path = format!("{}.c", base_path);
                let mut c_file = File::create(&c_path)?;
                c_file.write_all(emit_c(&prog).as_bytes())?;

                run_cmd(
                    &config.c.cc_path,
                    &cc_args(&config, &c_path, base_path),
                    verbose)?;

                let binary_path = env::current_dir()?.join(base_path);
                let status = Command::new(&binary_path).status()?;
                exit(status.code().unwrap_or(1));
            }
            Backend::Lisp => {
                eprintln!("the lisp backend cannot be run");
                exit(1);
            }
            Backend::Eval => {}
        }
    }

    let mut text = translate(&prog, backend).unwrap_or_else(|err| {
        eprintln!("{}", err);
        exit(1);
    });
    if !text.ends_with('\n') {
        text.push('\n');
    }
    write_output(&text, output_path)
}
