use circuit_autoroute::EffectScheduler;
use circuit_common::db::core::DesignDB;
use circuit_common::db::indices::NodeId;
use circuit_common::db::parser::design;
use circuit_common::tree::core::Tree;
use circuit_common::tree::hints;
use circuit_common::util::{generator, logger, visualization};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_name = "FILE", default_value = "design.toml")]
    design: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Layout,
    Route,
    Flow,
    Generate {
        #[arg(long, default_value_t = 16)]
        components: usize,
        #[arg(long, default_value_t = 12)]
        traces: usize,
        #[arg(long)]
        autorouter_url: Option<String>,
        #[arg(long, default_value = "inputs/random.toml")]
        output: String,
    },
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();
    let command = args.command.unwrap_or(Commands::Flow);

    match command {
        Commands::Generate {
            components,
            traces,
            autorouter_url,
            output,
        } => {
            prepare_output_dir(&output)?;
            generator::generate_random_design(
                &output,
                components,
                traces,
                autorouter_url.as_deref(),
            )?;
            log::info!("Generated: {}", output);
        }
        Commands::Layout => {
            let (mut db, mut tree, _root) = load_design(&args.design)?;
            run_trace_hints(&mut tree);
            let failures = run_schematic_layout(&mut db, &tree);
            report_layout_failures(failures);
            draw_schematic(&db)?;
        }
        Commands::Route => {
            let (_db, mut tree, _root) = load_design(&args.design)?;
            run_trace_hints(&mut tree);
            run_trace_render_and_drain(&tree)?;
        }
        Commands::Flow => {
            let (mut db, mut tree, _root) = load_design(&args.design)?;
            run_trace_hints(&mut tree);

            let failures = run_schematic_layout(&mut db, &tree);
            report_layout_failures(failures);
            draw_schematic(&db)?;

            run_trace_render_and_drain(&tree)?;
        }
    }

    Ok(())
}

fn load_design(path: &Path) -> anyhow::Result<(DesignDB, Tree, NodeId)> {
    if !path.exists() {
        return Err(anyhow::anyhow!("Design file missing: {:?}", path));
    }
    let mut db = DesignDB::new();
    let mut tree = Tree::new();
    let root = design::parse(&mut db, &mut tree, &path.to_string_lossy())
        .map_err(|e| anyhow::anyhow!("Invalid design in {:?}: {}", path, e))?;
    Ok((db, tree, root))
}

fn run_trace_hints(tree: &mut Tree) {
    for group in tree.groups() {
        hints::create_trace_hints_from_layout(tree, group);
    }
}

fn run_schematic_layout(db: &mut DesignDB, tree: &Tree) -> usize {
    let mut failures = 0;
    for group in tree.groups() {
        let name = tree
            .group(group)
            .map(|g| g.name.clone())
            .unwrap_or_default();
        if let Err(e) = circuit_layout::run(db, tree, group) {
            log::error!("Schematic layout failed for group '{}': {}", name, e);
            failures += 1;
        }
    }
    failures
}

fn report_layout_failures(failures: usize) {
    if failures > 0 {
        log::warn!(
            "{} group(s) kept their previous schematic positions",
            failures
        );
    }
}

fn run_trace_render(tree: &Tree, scheduler: &EffectScheduler) {
    for group in tree.groups() {
        let policy = circuit_autoroute::do_initial_pcb_trace_render(tree, group, scheduler);
        log::debug!("group {:?} routing policy: {:?}", group, policy);
    }
}

fn run_trace_render_and_drain(tree: &Tree) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let scheduler = EffectScheduler::new(rt.handle().clone());

    run_trace_render(tree, &scheduler);

    let failures = rt.block_on(scheduler.drain());
    if failures > 0 {
        log::warn!(
            "{} autorouter request(s) failed; affected groups are left unrouted",
            failures
        );
    }
    Ok(())
}

fn draw_schematic(db: &DesignDB) -> anyhow::Result<()> {
    let path = "output/schematic.png";
    prepare_output_dir(path)?;
    log::info!("Generating schematic visualization...");
    visualization::draw_schematic(db, path, 1000, 1000);
    Ok(())
}

fn prepare_output_dir(path_str: &str) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(path_str).parent() {
        if !parent.exists() && !parent.as_os_str().is_empty() {
            log::info!("Creating output directory: {:?}", parent);
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
