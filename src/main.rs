use anyhow::Context;
use bitmap_topology::config::EnvConfig;
use bitmap_topology::membership::{ProcessAddr, ProcessId};
use bitmap_topology::topology::{Bitmap, Cluster, FragmentId, compute_slice_id};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        // .with_max_level(tracing::Level::DEBUG)
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!(
            "Usage: {} --database <name> [--frame <name>]... [--slices <n>] [--fragments <n>] [--host <host>] [--port <port>] [--item <id>]...",
            args[0]
        );
        eprintln!(
            "Example: {} --database users --frame default --slices 2 --fragments 4 --item 42 --item 1048600",
            args[0]
        );
        eprintln!("Supported frames are read from BITMAP_SUPPORTED_FRAMES (default: \"default\")");

        std::process::exit(1);
    }

    let mut database_name: Option<String> = None;
    let mut frames: Vec<String> = vec![];
    let mut slices: u64 = 1;
    let mut fragments: u64 = 1;
    let mut host = "localhost".to_string();
    let mut port: u16 = 10101;
    let mut items: Vec<u64> = vec![];

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--database", Some(v)) => database_name = Some(v.clone()),
            ("--frame", Some(v)) => frames.push(v.clone()),
            ("--slices", Some(v)) => slices = v.parse().context("--slices")?,
            ("--fragments", Some(v)) => fragments = v.parse().context("--fragments")?,
            ("--host", Some(v)) => host = v.clone(),
            ("--port", Some(v)) => port = v.parse().context("--port")?,
            ("--item", Some(v)) => items.push(v.parse().context("--item")?),
            (flag, _) => {
                tracing::warn!("Ignoring argument {}", flag);
                i += 1;
                continue;
            }
        }
        i += 2;
    }

    let database_name = database_name.context("--database is required")?;
    if frames.is_empty() {
        frames.push("default".to_string());
    }

    // 1. Topology:
    let cluster = Cluster::new(Arc::new(EnvConfig::default()));
    let database = cluster.get_or_create_database(&database_name);

    for name in &frames {
        database.get_or_create_frame(name)?;
    }
    for slice_id in 0..slices {
        database.get_or_create_slice(slice_id);
    }

    // 2. One process per fragment index, sharing the host:
    let mut process_ids = Vec::new();
    for n in 0..fragments {
        let offset = u16::try_from(n * 2).context("too many fragments for the port range")?;
        let tcp = port.checked_add(offset).context("port out of range")?;
        let http = tcp.checked_add(1).context("port out of range")?;
        let id = ProcessId::new();
        cluster
            .processes()
            .register(id, ProcessAddr::new(host.clone(), tcp, http));
        process_ids.push(id);
    }

    // 3. One fragment per process in every frame/slice:
    for fsi in database.get_frame_slice_intersects() {
        for (n, process_id) in process_ids.iter().enumerate() {
            let fragment_id = FragmentId::new();
            database.get_or_create_fragment(fsi.frame(), &fsi.slice(), fragment_id)?;
            database.assign_fragment(fsi.frame(), &fsi.slice(), fragment_id, *process_id)?;
            tracing::debug!("Fragment {} -> process #{}", fragment_id, n);
        }
    }

    tracing::info!(
        "Database '{}': {} frame(s), {} slice(s), {} intersect(s), {} process(es)",
        database.name(),
        database.frames().len(),
        database.num_slices()?,
        database.get_frame_slice_intersects().len(),
        cluster.processes().len()
    );

    // 4. Resolve requested items:
    for item in items {
        for name in &frames {
            let bitmap = Bitmap::new(item, name.clone());
            match cluster.locate(&database_name, &bitmap) {
                Ok(location) => {
                    let addr = cluster
                        .process_for(&location)
                        .map(|p| p.addr().tcp_endpoint())
                        .unwrap_or_default();
                    tracing::info!(
                        "item {} frame '{}' slice {} -> fragment {} on process {} ({})",
                        item,
                        name,
                        compute_slice_id(item),
                        location.fragment_id,
                        location.process_id,
                        addr
                    );
                }
                Err(e) => tracing::warn!("item {} frame '{}': {}", item, name, e),
            }
        }
    }

    Ok(())
}
