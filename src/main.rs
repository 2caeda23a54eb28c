//! Patchbay CLI - Hierarchical Signal-Flow Graphs
//!
//! This is a demonstration CLI for the patchbay library.

use anyhow::Result;
use patchbay::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("🎛️  Patchbay - Hierarchical Signal-Flow Graphs v{}", patchbay::VERSION);
    println!();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        return Ok(());
    }

    match args[1].as_str() {
        "tree" => show_tree()?,
        "connections" => show_connections()?,
        "order" => show_order()?,
        "demo" => run_demo()?,
        "help" | "--help" | "-h" => print_usage(&args[0]),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage(&args[0]);
        }
    }

    Ok(())
}

fn print_usage(program: &str) {
    println!("Usage: {} <command>", program);
    println!();
    println!("Commands:");
    println!("  tree           Print the demo patch hierarchy");
    println!("  connections    Print the hierarchy with outgoing connections");
    println!("  order          Resolve and print the processing order");
    println!("  demo           Full walkthrough: tree, connections, order, cycle check");
    println!("  help           Show this help message");
    println!();
    println!("Set RUST_LOG=debug to trace graph edits.");
}

/// A master patch with two nested effect sections fed from one split input.
fn demo_patch() -> Result<Patch> {
    let mut reverb = Patch::new().with_name("Reverb");
    reverb.add("spread", Splitter::new(2).with_name("Spread"))?;
    reverb.add("early", Passthrough::new().with_name("Early"))?;
    reverb.add("late", Passthrough::new().with_name("Late"))?;
    reverb.add("blend", Mixer::new(2).with_name("Blend"))?;
    reverb.connect("spread", "out1", "early", "input")?;
    reverb.connect("spread", "out2", "late", "input")?;
    reverb.connect("early", "output", "blend", "in1")?;
    reverb.connect("late", "output", "blend", "in2")?;
    reverb.map_input("input", "spread", "input")?;
    reverb.map_output("output", "blend", "mix")?;

    let mut eq = Patch::new().with_name("EQ");
    eq.add("low", Passthrough::new().with_name("Low"))?;
    eq.add("mid", Passthrough::new().with_name("Mid"))?;
    eq.add("high", Passthrough::new().with_name("High"))?;
    eq.chain("low", "mid")?;
    eq.chain("mid", "high")?;
    eq.map_input("input", "low", "input")?;
    eq.map_output("output", "high", "output")?;

    let mut master = Patch::new().with_name("Master");
    master.add("src", Source::silent().with_name("MainIn"))?;
    master.add("split", Splitter::new(2).with_name("Split"))?;
    master.add("reverb", reverb)?;
    master.add("eq", eq)?;
    master.add("sum", Mixer::new(2).with_name("Sum"))?;
    master.add("out", Sink::new().with_name("MainOut"))?;

    master.chain("src", "split")?;
    master.connect("split", "out1", "reverb", "input")?;
    master.connect("split", "out2", "eq", "input")?;
    master.connect("reverb", "output", "sum", "in1")?;
    master.connect("eq", "output", "sum", "in2")?;
    master.connect("sum", "mix", "out", "input")?;

    Ok(master)
}

fn show_tree() -> Result<()> {
    let patch = demo_patch()?;
    println!("{}", HierarchyTree::new(&patch).render());
    Ok(())
}

fn show_connections() -> Result<()> {
    let patch = demo_patch()?;
    println!("{}", HierarchyTree::new(&patch).with_connections().render());
    Ok(())
}

fn show_order() -> Result<()> {
    let patch = demo_patch()?;
    let schedule = patch.resolve()?;
    println!("{}", OrderReport::new(&patch).render_schedule(&schedule)?);
    println!();
    println!("✅ {} leaf blocks scheduled", schedule.len());
    Ok(())
}

fn run_demo() -> Result<()> {
    let patch = demo_patch()?;

    println!("🧩 Hierarchy:");
    println!("{}", HierarchyTree::new(&patch).render());
    println!();

    println!("🔌 Connections:");
    println!("{}", HierarchyTree::new(&patch).with_connections().render());
    println!();

    println!("⚙️  Resolving...");
    println!("{}", OrderReport::new(&patch).render()?);
    println!();

    // Close a loop on purpose to show the resolver refusing it.
    println!("🔁 Cycle check:");
    let mut feedback = Patch::new().with_name("Feedback");
    feedback.add("a", Passthrough::new().with_name("A"))?;
    feedback.add("b", Passthrough::new().with_name("B"))?;
    feedback.chain("a", "b")?;
    feedback.chain("b", "a")?;
    match feedback.resolve() {
        Err(e) => println!("   rejected as expected: {e}"),
        Ok(_) => println!("   unexpectedly resolved"),
    }

    Ok(())
}
