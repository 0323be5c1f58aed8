use anyhow::{Context, Result};
use log::{debug, info};

use crate::{
    package::PackageSpec,
    provider::{PackageProvider, RegistryProvider},
    resolver::{Resolution, Resolver, resolve_collection},
    runtime::Runtime,
};

pub mod config;
mod format;
mod paths;

pub use config::Config;
pub use format::OutputFormat;
pub use paths::{CONFIG_DIR_ENV, default_registry_path};

/// Resolve specs and print the installation order
#[tracing::instrument(skip(config))]
pub fn resolve<R: Runtime>(config: Config<R>, specs: &[String]) -> Result<()> {
    let provider = config.provider()?;
    let output = render_resolution(provider.as_ref(), specs, config.format)?;
    println!("{}", output);
    Ok(())
}

fn render_resolution<P: PackageProvider + ?Sized>(
    provider: &P,
    specs: &[String],
    format: OutputFormat,
) -> Result<String> {
    let resolution = Resolver::new(provider)
        .resolve(specs)
        .context("Failed to resolve packages")?;
    format.render(&resolution)
}

/// Print the dependency chain of a single package
#[tracing::instrument(skip(config))]
pub fn chain<R: Runtime>(config: Config<R>, spec: &str) -> Result<()> {
    let provider = config.provider()?;
    let output = render_chain(provider.as_ref(), spec, config.format)?;
    println!("{}", output);
    Ok(())
}

fn render_chain<P: PackageProvider + ?Sized>(
    provider: &P,
    spec: &str,
    format: OutputFormat,
) -> Result<String> {
    let chain = Resolver::new(provider)
        .chain_of(spec)
        .with_context(|| format!("Failed to gather chain for {}", spec))?;
    format.render(&Resolution::new(chain))
}

/// Validate every package of the configured registry
#[tracing::instrument(skip(config))]
pub fn check<R: Runtime>(config: Config<R>) -> Result<()> {
    let path = config.registry_path().context(
        "No package registry configured. Pass --registry or set PKGCHAIN_REGISTRY.",
    )?;
    let provider = RegistryProvider::load(&config.runtime, &path)
        .context("Failed to load package registry")?;

    let count = check_registry(&provider)?;
    println!("{}: {} package(s), all chains resolve", path.display(), count);
    Ok(())
}

/// Resolve every package in the registry, returning how many were resolved.
fn check_registry(provider: &RegistryProvider) -> Result<usize> {
    let specs: Vec<PackageSpec> = provider.registry().names().map(PackageSpec::named).collect();
    debug!("Checking {} registry package(s)", specs.len());

    let resolution = provider
        .build(&specs)
        .and_then(|collection| resolve_collection(&collection))
        .context("Registry check failed")?;

    info!("Registry check resolved {} package(s)", resolution.len());
    Ok(resolution.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;
    use crate::package::PackageCollection;
    use crate::provider::{DeclarationProvider, MockPackageProvider, ProviderKind, Registry};

    fn specs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_render_resolution_text() {
        let output = render_resolution(
            &DeclarationProvider::new(),
            &specs(&["A: B", "B: C"]),
            OutputFormat::Text,
        )
        .unwrap();
        assert_eq!(output, "C, B, A");
    }

    #[test]
    fn test_render_resolution_json() {
        let output = render_resolution(
            &DeclarationProvider::new(),
            &specs(&["A: B", "D: B"]),
            OutputFormat::Json,
        )
        .unwrap();
        assert_eq!(output, r#"["B","A","D"]"#);
    }

    #[test]
    fn test_render_resolution_error_has_context() {
        let mut provider = MockPackageProvider::new();
        provider.expect_kind().return_const(ProviderKind::Registry);
        provider
            .expect_build_collection()
            .returning(|_| Err(ResolveError::UnknownPackage("ghost".into())));

        let err = render_resolution(&provider, &specs(&["ghost"]), OutputFormat::Text)
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to resolve packages");
        assert_eq!(
            err.downcast_ref::<ResolveError>(),
            Some(&ResolveError::UnknownPackage("ghost".into()))
        );
    }

    #[test]
    fn test_render_chain_lines() {
        let mut provider = MockPackageProvider::new();
        provider.expect_kind().return_const(ProviderKind::Registry);
        provider.expect_build_collection().returning(|_| {
            let mut collection = PackageCollection::new();
            let app = collection.insert("app");
            let lib = collection.insert("lib");
            collection.set_dependency(app, Some(lib));
            collection.request(app);
            Ok(collection)
        });

        let output = render_chain(&provider, "app", OutputFormat::Lines).unwrap();
        assert_eq!(output, "lib\napp");
    }

    #[test]
    fn test_check_registry_counts_packages() {
        let mut registry = Registry::default();
        registry.insert("app", Some("lib"));
        registry.insert("lib", None);
        registry.insert("tool", None);

        let count = check_registry(&RegistryProvider::new(registry)).unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn test_check_registry_reports_cycle() {
        let mut registry = Registry::default();
        registry.insert("a", Some("b"));
        registry.insert("b", Some("a"));

        let err = check_registry(&RegistryProvider::new(registry)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ResolveError>(),
            Some(ResolveError::CyclicDependency { .. })
        ));
    }

    #[test]
    fn test_check_registry_reports_unknown_dependency() {
        let mut registry = Registry::default();
        registry.insert("a", Some("missing"));

        let err = check_registry(&RegistryProvider::new(registry)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ResolveError>(),
            Some(&ResolveError::UnknownPackage("missing".into()))
        );
    }

    #[test]
    fn test_check_registry_does_not_reparse_names() {
        let mut registry = Registry::default();
        registry.insert("app", Some("my lib"));
        registry.insert("my lib", None);

        let count = check_registry(&RegistryProvider::new(registry)).unwrap();
        assert_eq!(count, 2);
    }
}
