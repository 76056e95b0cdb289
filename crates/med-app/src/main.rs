// ABOUTME: Main application entry point.
// ABOUTME: Dispatches project, editor and sheet commands against the local store.

mod editor;

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use med_core::{Config, OpeningType, Project, ProjectInfo, ProjectStore, StoreError};
use med_layout::EditSession;
use med_sheet::{layout_project, render_project, sheet::set_title};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
usage: medidor <command>

  types                               list opening types
  projects                            list projects
  project-add client=.. [name=..] [address=..] [color=..] [line=..] [glass=..]
  project-rm PROJECT
  sets PROJECT                        list the sets of a project
  edit PROJECT [SET]                  edit a set, commands on stdin
  set-rm PROJECT SET
  sheet PROJECT                       print the technical sheet
  config-init                         write the default config file";

struct App {
    config: Config,
    store_path: PathBuf,
    store: ProjectStore,
}

impl App {
    fn new() -> Result<Self> {
        let config = Config::load_or_default();
        let store_path = config.store_path().ok_or(StoreError::NoDataPath)?;
        let store = ProjectStore::load_or_new(&store_path)
            .with_context(|| format!("Failed to load projects from {}", store_path.display()))?;
        tracing::info!(
            "Loaded {} projects from {}",
            store.projects.len(),
            store_path.display()
        );
        Ok(Self {
            config,
            store_path,
            store,
        })
    }

    fn persist(&self) -> Result<()> {
        self.store
            .save(&self.store_path)
            .with_context(|| format!("Failed to save projects to {}", self.store_path.display()))
    }

    fn run(&mut self, args: &[String]) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        match args.first().map(String::as_str) {
            Some("types") => {
                for t in OpeningType::all() {
                    writeln!(stdout, "{:<28} {}", t.id(), t.label())?;
                }
            }
            Some("projects") => {
                for p in &self.store.projects {
                    writeln!(
                        stdout,
                        "{}  {}  ({})  {} sets",
                        p.id,
                        p.name,
                        p.client,
                        p.measurements.len()
                    )?;
                }
            }
            Some("project-add") => {
                let info = project_info(&args[1..])?;
                let id = self.store.add_project(info);
                self.persist()?;
                writeln!(stdout, "{}", id)?;
            }
            Some("project-rm") => {
                let id = arg(args, 1, "PROJECT")?;
                self.store.delete_project(id)?;
                self.persist()?;
            }
            Some("sets") => {
                let project_id = arg(args, 1, "PROJECT")?;
                let project = self
                    .store
                    .project(project_id)
                    .ok_or_else(|| StoreError::UnknownProject(project_id.to_string()))?;
                write_sets(project, &mut stdout)?;
            }
            Some("edit") => {
                let project_id = arg(args, 1, "PROJECT")?;
                let set_id = args.get(2).map(String::as_str);
                let project = self
                    .store
                    .project(project_id)
                    .ok_or_else(|| StoreError::UnknownProject(project_id.to_string()))?;

                let mut session = match set_id {
                    Some(mid) => {
                        let m = project
                            .measurement(mid)
                            .ok_or_else(|| StoreError::UnknownMeasurement(mid.to_string()))?;
                        EditSession::open(m.set.clone())
                    }
                    None => EditSession::new(self.config.default_width, self.config.default_height),
                };

                eprintln!("{}", editor::HELP);
                let stdin = std::io::stdin().lock();
                let saved =
                    editor::run(&mut session, &self.config.placeholder_code, stdin, &mut stdout)?;

                match saved {
                    Some(set) => {
                        let id = self.store.save_measurement(project_id, set, set_id)?;
                        self.persist()?;
                        writeln!(stdout, "saved {}", id)?;
                    }
                    None => writeln!(stdout, "discarded")?,
                }
            }
            Some("set-rm") => {
                let project_id = arg(args, 1, "PROJECT")?;
                let set_id = arg(args, 2, "SET")?;
                self.store.delete_measurement(project_id, set_id)?;
                self.persist()?;
            }
            Some("sheet") => {
                let project_id = arg(args, 1, "PROJECT")?;
                let project = self
                    .store
                    .project(project_id)
                    .ok_or_else(|| StoreError::UnknownProject(project_id.to_string()))?;
                let sheet = layout_project(project, &self.config.studio_name);
                write!(stdout, "{}", render_project(&sheet))?;
            }
            Some("config-init") => {
                let path = self.config.save_to_default()?;
                writeln!(stdout, "{}", path.display())?;
            }
            _ => {
                eprintln!("{}", USAGE);
            }
        }
        Ok(())
    }
}

fn arg<'a>(args: &'a [String], idx: usize, name: &str) -> Result<&'a str> {
    match args.get(idx) {
        Some(value) => Ok(value.as_str()),
        None => bail!("Missing {}\n\n{}", name, USAGE),
    }
}

/// Build project metadata from `key=value` arguments
fn project_info(args: &[String]) -> Result<ProjectInfo> {
    let mut fields: HashMap<&str, String> = HashMap::new();
    for a in args {
        let Some((key, value)) = a.split_once('=') else {
            bail!("Expected key=value, got {}", a);
        };
        match key {
            "name" | "client" | "address" | "color" | "line" | "glass" => {
                fields.insert(key, value.trim().to_string());
            }
            other => bail!("Unknown project field: {}", other),
        }
    }

    let client = fields.remove("client").unwrap_or_default();
    if client.is_empty() {
        bail!("A project needs a client");
    }
    let name = match fields.remove("name") {
        Some(name) if !name.is_empty() => name,
        _ => format!("Obra {}", client),
    };
    let optional = |v: Option<String>| v.filter(|s| !s.is_empty());

    Ok(ProjectInfo {
        name,
        client,
        address: fields.remove("address").unwrap_or_default(),
        color: optional(fields.remove("color")),
        line: optional(fields.remove("line")),
        glass: optional(fields.remove("glass")),
    })
}

/// One line per set: id, code, title and overall size
fn write_sets(project: &Project, out: &mut impl Write) -> Result<()> {
    for m in &project.measurements {
        writeln!(
            out,
            "{}  {:<8} {:<28} {} x {}",
            m.id,
            m.set.display_code(),
            set_title(&m.set),
            m.set.width,
            m.set.height
        )?;
    }
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("med_app=info,med_core=info,med_layout=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    tracing::info!("Starting medidor");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut app = App::new()?;
    app.run(&args)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use med_core::{MeasurementSet, Module};

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn project_fields_from_arguments() {
        let info = project_info(&strings(&[
            "name=Casa Lopez",
            "client=Lopez",
            "line=Modena",
            "color=",
        ]))
        .unwrap();
        assert_eq!(info.name, "Casa Lopez");
        assert_eq!(info.client, "Lopez");
        assert_eq!(info.line.as_deref(), Some("Modena"));
        assert_eq!(info.color, None);
        assert!(info.address.is_empty());
    }

    #[test]
    fn project_needs_a_client() {
        assert!(project_info(&strings(&["name=Casa"])).is_err());
        assert!(project_info(&strings(&["name=Casa", "client= "])).is_err());
        assert!(project_info(&strings(&["client=X", "budget=10"])).is_err());
        assert!(project_info(&strings(&["client"])).is_err());
    }

    #[test]
    fn project_name_defaults_from_client() {
        let info = project_info(&strings(&["client=Lopez"])).unwrap();
        assert_eq!(info.name, "Obra Lopez");
        assert_eq!(info.client, "Lopez");

        let info = project_info(&strings(&["client=Lopez", "name="])).unwrap();
        assert_eq!(info.name, "Obra Lopez");
    }

    #[test]
    fn sets_are_listed_with_code_and_size() {
        let mut store = ProjectStore::default();
        let pid = store.add_project(project_info(&strings(&["client=Lopez"])).unwrap());

        let mut single = MeasurementSet::new(900, 2000);
        single.code = "V-01".to_string();
        single.modules = vec![Module::new(OpeningType::PanoFijo, 0, 0)];
        let first = store.save_measurement(&pid, single, None).unwrap();

        let mut pair = MeasurementSet::new(1600, 1200);
        pair.modules = vec![
            Module::new(OpeningType::Sliding2, 0, 0),
            Module::new(OpeningType::PanoFijo, 1, 0),
        ];
        let second = store.save_measurement(&pid, pair, None).unwrap();

        let mut out = Vec::new();
        write_sets(store.project(&pid).unwrap(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let single_line = lines.iter().find(|l| l.starts_with(&first)).unwrap();
        assert!(single_line.contains("V-01"));
        assert!(single_line.contains(OpeningType::PanoFijo.label()));
        assert!(single_line.ends_with("900 x 2000"));

        let pair_line = lines.iter().find(|l| l.starts_with(&second)).unwrap();
        assert!(pair_line.contains("S/C"));
        assert!(pair_line.contains("CONJUNTO"));
        assert!(pair_line.ends_with("1600 x 1200"));
    }
}
