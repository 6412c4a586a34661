use casemap_shared::dataset::{parse_cases, parse_iso_lookup, parse_world};
use casemap_shared::{DataSources, DatasetKind, Datasets, LoadError};

/// GET one document as text, mapping transport and status failures to `LoadError`.
async fn fetch_text(dataset: DatasetKind, url: &str) -> Result<String, LoadError> {
    let resp = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| LoadError::Fetch {
            dataset,
            message: e.to_string(),
        })?;

    if !resp.ok() {
        return Err(LoadError::Status {
            dataset,
            status: resp.status(),
        });
    }

    resp.text().await.map_err(|e| LoadError::Fetch {
        dataset,
        message: e.to_string(),
    })
}

/// Fetch and parse the three startup documents concurrently.
///
/// The first failure (network, status or parse) fails the whole load; no
/// partial data is ever returned.
pub async fn load_datasets(sources: &DataSources) -> Result<Datasets, LoadError> {
    tracing::info!(
        world = %sources.world,
        cases = %sources.cases,
        iso = %sources.iso,
        "loading datasets"
    );

    let world = async {
        let text = fetch_text(DatasetKind::WorldGeometry, &sources.world).await?;
        parse_world(&text)
    };
    let cases = async {
        let text = fetch_text(DatasetKind::CaseCounts, &sources.cases).await?;
        parse_cases(&text)
    };
    let iso = async {
        let text = fetch_text(DatasetKind::IsoLookup, &sources.iso).await?;
        parse_iso_lookup(&text)
    };

    let (world, cases, iso) = futures::try_join!(world, cases, iso)?;
    Ok(Datasets { world, cases, iso })
}
