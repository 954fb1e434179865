//! Module generation command
//!
//! Generates the selected components for one or more modules. Modules whose
//! table does not exist yet fall back to a migration-only scaffold and have
//! their component filter parked for a later `replay`; the batch carries on
//! past such modules.

use std::path::Path;

use anyhow::{bail, Context, Result};
use console::style;
use modforge::pending::{PendingFilters, RecordedFilter};
use modforge::schema::{connect, introspect, SchemaBackend, SchemaError};
use modforge::stubs::{StubKind, StubStore};
use modforge::{ModforgeConfig, ModforgeError, ModuleGenerator, ModuleOptions, ModuleSpec, WriteOutcome};

pub struct MakeCommand {
    modules: Vec<String>,
    only: Option<String>,
    except: Option<String>,
    table: Option<String>,
    skip_table: bool,
    force: bool,
}

impl MakeCommand {
    pub fn new(
        modules: Vec<String>,
        only: Option<String>,
        except: Option<String>,
        table: Option<String>,
        skip_table: bool,
        force: bool,
    ) -> Self {
        Self {
            modules,
            only,
            except,
            table,
            skip_table,
            force,
        }
    }

    /// Rejects invalid option combinations before any file or database
    /// touch.
    fn validate_options(&self) -> Result<()> {
        if self.modules.len() > 1 && self.table.is_some() {
            bail!(ModforgeError::InvalidOptions(
                "--table applies to a single module; drop it or generate the modules one by one"
                    .to_string()
            ));
        }
        Ok(())
    }

    pub async fn execute(&self) -> Result<()> {
        let config = ModforgeConfig::load().context("Failed to load configuration")?;

        self.validate_options()?;
        let only = parse_kinds(self.only.as_deref())?;
        let except = parse_kinds(self.except.as_deref())?;

        let stubs = config
            .stub_dir
            .as_ref()
            .map_or_else(StubStore::builtin, StubStore::with_dir);

        let backend = if self.skip_table {
            None
        } else {
            let url = config
                .database_url
                .clone()
                .or_else(|| std::env::var("DATABASE_URL").ok())
                .context(
                    "No database connection configured; set database_url in modforge.toml, \
                     export DATABASE_URL, or pass --skip-table",
                )?;
            Some(connect(&url).await.context("Failed to connect to the database")?)
        };

        let index_path = config.pending_index_path();
        let mut pending = PendingFilters::load(&index_path)
            .context("Failed to load the pending-filter index")?;

        let mut generated = 0usize;
        for module in &self.modules {
            println!(
                "\n{} {} {}",
                style("Making module").cyan().bold(),
                style(module).green().bold(),
                style("...").cyan().bold()
            );

            let options = ModuleOptions {
                only: only.clone(),
                except: except.clone(),
                table: self.table.clone(),
                force: self.force,
            };
            let spec = ModuleSpec::new(module, options, &config);

            let done = self
                .generate_one(module, &spec, backend.as_deref(), &stubs, &config, &mut pending)
                .await?;
            if done {
                generated += 1;
            }
        }

        pending
            .save(&index_path)
            .context("Failed to save the pending-filter index")?;

        if generated > 0 {
            println!(
                "\n{} {} module{} ready!",
                style("✨").green().bold(),
                style(generated).green().bold(),
                if generated == 1 { "" } else { "s" }
            );
            println!("\n{}", style("Next steps:").cyan().bold());
            println!(
                "  1. Register the module routes: {}",
                style("call the generated Routes/<Module>Route.rs register fn at boot").yellow()
            );
            println!(
                "  2. Review the generated validation rules: {}",
                style("Requests/").yellow()
            );
        }
        Ok(())
    }

    /// Generates one module; returns whether full generation ran.
    async fn generate_one(
        &self,
        module: &str,
        spec: &ModuleSpec,
        backend: Option<&dyn SchemaBackend>,
        stubs: &StubStore,
        config: &ModforgeConfig,
        pending: &mut PendingFilters,
    ) -> Result<bool> {
        let schema = match backend {
            None => None,
            Some(backend) => match introspect(backend, &spec.table).await {
                Ok(schema) => Some(schema),
                Err(SchemaError::TableNotFound { table }) => {
                    let generator = ModuleGenerator::new(spec, None, stubs, config);
                    let migration = generator.render_migration();
                    generator.write(Path::new("."), &migration)?;
                    pending.record(
                        &spec.table,
                        RecordedFilter {
                            module: module.to_string(),
                            only: kind_names(&spec.only),
                            except: kind_names(&spec.except),
                        },
                    );
                    println!(
                        "  {} table {} not found; wrote {}",
                        style("!").yellow().bold(),
                        style(&table).yellow(),
                        style(&migration.description).dim()
                    );
                    println!(
                        "    run the migration, then: {}",
                        style(format!("modforge replay {}", spec.table)).yellow()
                    );
                    return Ok(false);
                }
                Err(err) => {
                    println!(
                        "  {} introspection failed for {}: {err}",
                        style("✗").red().bold(),
                        style(&spec.table).yellow()
                    );
                    return Ok(false);
                }
            },
        };

        let generator = ModuleGenerator::new(spec, schema.as_ref(), stubs, config);
        let artifacts = match generator.render_all() {
            Ok(artifacts) => artifacts,
            Err(ModforgeError::EmptySelection) => {
                println!(
                    "  {} component filter left nothing to generate",
                    style("!").yellow().bold()
                );
                return Ok(false);
            }
            Err(err) => return Err(err.into()),
        };

        for artifact in &artifacts {
            match generator.write(Path::new("."), artifact)? {
                WriteOutcome::Written => println!(
                    "  {} {} ({})",
                    style("✓").green(),
                    style(artifact.path.display()).dim(),
                    style(&artifact.description).dim()
                ),
                WriteOutcome::Skipped => println!(
                    "  {} {} (exists, skipped)",
                    style("-").dim(),
                    style(artifact.path.display()).dim()
                ),
            }
        }

        // A successful run settles any filter parked under this table.
        pending.take(&spec.table);
        Ok(true)
    }
}

fn parse_kinds(list: Option<&str>) -> Result<Vec<StubKind>> {
    let Some(list) = list else {
        return Ok(Vec::new());
    };
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<StubKind>().map_err(anyhow::Error::msg))
        .collect()
}

fn kind_names(kinds: &[StubKind]) -> Vec<String> {
    kinds.iter().map(|k| k.as_str().to_lowercase()).collect()
}
