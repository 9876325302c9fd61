use super::*;
use crate::error::{AppError, AppResult};
use std::collections::BTreeMap;
use std::future::Future;

fn run_async_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::fixture(format!("Failed to build runtime: {}", err)))?;
    runtime.block_on(future)
}

fn ids() -> FixtureIds {
    FixtureIds {
        dataset_id: "syn51".to_owned(),
        project_id: "syn23".to_owned(),
        asset_view: "syn23643253".to_owned(),
    }
}

#[test]
fn static_fixtures_return_configured_ids() -> AppResult<()> {
    run_async_test(async {
        let provisioner = StaticFixtures::new(ids());
        let token = AccessToken::new("secret");

        let provisioned = provisioner.provision(token.as_ref()).await?;

        if provisioned != ids() {
            return Err(AppError::fixture(format!(
                "Unexpected ids {:?}",
                provisioned
            )));
        }
        provisioned.validate()?;
        Ok(())
    })
}

#[test]
fn blank_ids_fail_validation() -> AppResult<()> {
    let fixtures = FixtureIds {
        project_id: "  ".to_owned(),
        ..ids()
    };
    match fixtures.validate() {
        Err(FixtureError::EmptyId {
            field: "project_id",
        }) => Ok(()),
        Err(err) => Err(AppError::fixture(format!("Unexpected error {}", err))),
        Ok(()) => Err(AppError::fixture("Expected blank project_id to fail")),
    }
}

#[test]
fn lookup_knows_fixture_placeholders() -> AppResult<()> {
    let fixtures = ids();
    if fixtures.lookup("asset_view") != Some("syn23643253") || fixtures.lookup("token").is_some() {
        return Err(AppError::fixture("Unexpected placeholder lookup"));
    }
    Ok(())
}

#[test]
fn token_prefers_synapse_variable() -> AppResult<()> {
    let env: BTreeMap<&str, &str> = [("SYNAPSE_AUTH_TOKEN", "primary"), ("TOKEN", "fallback")]
        .into_iter()
        .collect();
    let token = AccessToken::from_lookup(|name| env.get(name).map(|value| (*value).to_owned()))
        .ok_or_else(|| AppError::fixture("Expected a token"))?;
    if token.secret() != "primary" {
        return Err(AppError::fixture("Expected SYNAPSE_AUTH_TOKEN to win"));
    }
    Ok(())
}

#[test]
fn token_falls_back_when_primary_is_blank() -> AppResult<()> {
    let env: BTreeMap<&str, &str> = [("SYNAPSE_AUTH_TOKEN", ""), ("TOKEN", "fallback")]
        .into_iter()
        .collect();
    let token = AccessToken::from_lookup(|name| env.get(name).map(|value| (*value).to_owned()))
        .ok_or_else(|| AppError::fixture("Expected a token"))?;
    if token.bearer_header() != ("Authorization".to_owned(), "Bearer fallback".to_owned()) {
        return Err(AppError::fixture("Unexpected bearer header"));
    }
    if AccessToken::from_lookup(|_| None).is_some() {
        return Err(AppError::fixture("Expected no token"));
    }
    Ok(())
}

#[test]
fn token_debug_is_redacted() -> AppResult<()> {
    let token = AccessToken::new("very-secret").ok_or_else(|| AppError::fixture("Expected token"))?;
    let rendered = format!("{:?}", token);
    if rendered.contains("very-secret") {
        return Err(AppError::fixture(format!("Token leaked: {}", rendered)));
    }
    Ok(())
}
