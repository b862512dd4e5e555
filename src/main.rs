use std::env;
use std::ffi::OsStr;
use std::path::PathBuf;

use anyhow::Context as _;
use log::{error, info};
use seahorse::{App, Context, Flag, FlagType};

use invoice_sheet::generate_invoice;
use invoice_sheet::input::{Config, ConfigBuilder};
use invoice_sheet::render::RendererKind;

fn set_env_if_absent<K: AsRef<OsStr>, V: AsRef<OsStr>>(var: K, default: impl FnOnce() -> V) {
    if env::var(var.as_ref()).is_err() {
        env::set_var(var, default());
    }
}

fn main() {
    set_env_if_absent("RUST_APP_LOG", || "info");
    color_backtrace::install();
    pretty_env_logger::init_custom_env("RUST_APP_LOG");

    run();
}

fn exit_on_error(result: anyhow::Result<()>) {
    if let Err(e) = result {
        error!("{:?}", e);
        ::std::process::exit(1);
    }
}

fn path_flag(context: &Context, name: &str) -> Option<PathBuf> {
    context.string_flag(name).ok().map(PathBuf::from)
}

fn build_config(context: &Context) -> anyhow::Result<ConfigBuilder> {
    let mut builder = match path_flag(context, "config") {
        Some(path) => Config::try_from_toml_file(&path)?,
        None => Config::builder(),
    };

    if let Some(renderer) = context.string_flag("renderer").ok() {
        builder.renderer(renderer.parse::<RendererKind>()?);
    }

    if let Some(path) = path_flag(context, "engine") {
        builder.engine_path(path);
    }

    if let Some(dir) = path_flag(context, "preserve-dir") {
        builder.preserve_dir(dir);
    }

    match context.args.as_slice() {
        [] => {}
        [input] => {
            builder.input(input);
        }
        [input, output] => {
            builder.input(input).output(output);
        }
        _ => return Err(anyhow::anyhow!("expected at most an input and an output path")),
    }

    Ok(builder)
}

fn make(context: &Context) -> anyhow::Result<()> {
    let config = build_config(context)?.build();
    info!(
        "input: \"{}\", output: \"{}\"",
        config.input().display(),
        config.output().display()
    );

    let totals = generate_invoice(&config).with_context(|| {
        format!(
            "failed to create an invoice from `{}`",
            config.input().display()
        )
    })?;
    info!("total hours: {}, total cost: ${}", totals.hours(), totals.cost());

    let output = dunce::canonicalize(config.output()).unwrap_or_else(|_| config.output().into());
    println!("Invoice created successfully: {}", output.display());

    Ok(())
}

fn run() {
    let args: Vec<String> = env::args().collect();

    let app = App::new(env!("CARGO_PKG_NAME"))
        .description(env!("CARGO_PKG_DESCRIPTION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .usage(format!(
            "{} [args] [<input.csv> [<output.pdf>]]",
            args.first().map_or(env!("CARGO_PKG_NAME"), String::as_str)
        ))
        .flag(
            Flag::new("config", FlagType::String)
                .description("[optional] Path to a toml file with the invoice details."),
        )
        .flag(Flag::new("renderer", FlagType::String).description(
            "[optional] `direct` lays out the pdf itself, `markup` converts html with an external engine. Default: `direct`",
        ))
        .flag(Flag::new("engine", FlagType::String).description(
            "[optional] Path to the html to pdf engine used by the markup renderer. Default: `wkhtmltopdf`",
        ))
        .flag(Flag::new("preserve-dir", FlagType::String).description(
            "[optional] Keeps the files of a failed markup rendering in this directory.",
        ))
        .action(|context: &Context| exit_on_error(make(context)));

    app.run(args);
}
