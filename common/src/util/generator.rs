use rand::Rng;
use std::fs::File;
use std::io::Write;

/// Writes a random TOML design file: one subcircuit root group, a grid-free
/// scatter of two-port components, and a chain of traces between them.
pub fn generate_random_design(
    filename: &str,
    num_components: usize,
    num_traces: usize,
    autorouter_url: Option<&str>,
) -> std::io::Result<()> {
    let mut file = File::create(filename)?;
    let mut rng = rand::thread_rng();

    let comp_w = 2.0;
    let comp_h = 1.0;

    // Spread initial positions over a square that leaves the auto-layout
    // something to clean up.
    let span = ((num_components as f64).sqrt() * comp_w * 4.0).max(10.0);

    log::info!(
        "Generating random design: {} component(s), {} trace(s), span {:.1}",
        num_components,
        num_traces,
        span
    );

    writeln!(file, "[design]")?;
    writeln!(file, "name = \"random_demo\"")?;
    writeln!(file)?;
    writeln!(file, "[[groups]]")?;
    writeln!(file, "name = \"root\"")?;
    writeln!(file, "is_subcircuit = true")?;
    writeln!(file)?;
    writeln!(file, "[groups.layout]")?;
    writeln!(file, "sch_auto_layout_enabled = true")?;
    if let Some(url) = autorouter_url {
        writeln!(file)?;
        writeln!(file, "[groups.layout.autorouter]")?;
        writeln!(file, "server_url = \"{}\"", url)?;
    }

    for i in 0..num_components {
        let x = rng.gen_range(-span / 2.0..span / 2.0);
        let y = rng.gen_range(-span / 2.0..span / 2.0);

        writeln!(file)?;
        writeln!(file, "[[components]]")?;
        writeln!(file, "name = \"U{}\"", i)?;
        writeln!(file, "group = \"root\"")?;
        writeln!(file, "x = {:.3}", x)?;
        writeln!(file, "y = {:.3}", y)?;
        writeln!(file, "width = {:.1}", comp_w)?;
        writeln!(file, "height = {:.1}", comp_h)?;
        writeln!(file)?;
        writeln!(file, "[[components.ports]]")?;
        writeln!(file, "name = \"in\"")?;
        writeln!(file, "dx = {:.1}", -comp_w / 2.0)?;
        writeln!(file, "dy = 0.0")?;
        writeln!(file)?;
        writeln!(file, "[[components.ports]]")?;
        writeln!(file, "name = \"out\"")?;
        writeln!(file, "dx = {:.1}", comp_w / 2.0)?;
        writeln!(file, "dy = 0.0")?;
    }

    if num_components > 1 {
        for i in 0..num_traces {
            let from = rng.gen_range(0..num_components);
            let mut to = rng.gen_range(0..num_components);
            if to == from {
                to = (to + 1) % num_components;
            }

            writeln!(file)?;
            writeln!(file, "[[traces]]")?;
            writeln!(file, "name = \"t{}\"", i)?;
            writeln!(file, "group = \"root\"")?;
            writeln!(file, "from = \".U{} > .out\"", from)?;
            writeln!(file, "to = \".U{} > .in\"", to)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::core::DesignDB;
    use crate::db::parser::design;
    use crate::tree::core::Tree;

    #[test]
    fn generated_design_parses() {
        let dir = std::env::temp_dir().join("circuit-generator-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("random.toml");
        let path_str = path.to_str().unwrap();

        generate_random_design(path_str, 8, 6, Some("http://localhost:3120/route")).unwrap();

        let mut db = DesignDB::new();
        let mut tree = Tree::new();
        let root = design::parse(&mut db, &mut tree, path_str).unwrap();

        assert_eq!(db.num_components(), 8);
        assert_eq!(db.num_ports(), 16);
        assert_eq!(tree.traces_under(root).len(), 6);
        let g = tree.group(root).unwrap();
        assert!(g.layout.autorouter.is_some());
    }
}
