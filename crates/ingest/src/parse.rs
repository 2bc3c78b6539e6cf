//! Field extraction from listing and detail page markup

use rabbitrag_common::{RabbitRagError, Record, Result};
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

/// Listing page URL for one page of search results
pub fn listing_url(base_url: &str, page: u32, org_id: &str, species: &str) -> String {
    format!(
        "{}?breed=&age=&sex=&page={}&ids={}&locationid=&species={}",
        base_url, page, org_id, species
    )
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| RabbitRagError::scrape(format!("Invalid selector '{}': {:?}", css, e)))
}

/// Detail page links of a listing page, resolved against `base_url`
pub fn extract_detail_links(html: &str, base_url: &str) -> Result<Vec<String>> {
    let base = Url::parse(base_url)
        .map_err(|e| RabbitRagError::scrape(format!("Invalid base URL '{}': {}", base_url, e)))?;
    let cell_selector = selector("td.searchResultsCell")?;
    let link_selector = selector("a.petName[href]")?;

    let document = Html::parse_document(html);
    let mut links = Vec::new();

    for cell in document.select(&cell_selector) {
        let href = cell
            .select(&link_selector)
            .next()
            .and_then(|a| a.value().attr("href"));

        let Some(href) = href else {
            warn!("No pet link found in search result cell");
            continue;
        };

        match base.join(href) {
            Ok(url) => {
                debug!("Found detail link: {}", url);
                links.push(url.to_string());
            }
            Err(e) => warn!("Skipping unresolvable link '{}': {}", href, e),
        }
    }

    Ok(links)
}

/// Parse a detail page into a record. Missing elements yield empty fields
pub fn extract_record(html: &str, detail_url: &str) -> Result<Record> {
    let document = Html::parse_document(html);

    let name = first(&document, "div.pageCenterTitle")?
        .map(element_text)
        .unwrap_or_default();
    let pet_type = first(&document, "span#rgPetDetailsBreed")?
        .map(element_text)
        .unwrap_or_default();
    let gender = first(&document, "span#rgPetDetailsSex")?
        .map(labeled_text)
        .unwrap_or_default();
    let age = first(&document, "span#rgPetDetailsAge")?
        .map(labeled_text)
        .unwrap_or_default();
    let description = first(&document, "div.rgDescription")?
        .map(stripped_text)
        .unwrap_or_default();

    debug!(
        "Name: {}, Type: {}, Age: {}, Gender: {}",
        name, pet_type, age, gender
    );

    Ok(Record {
        name,
        pet_type,
        age,
        gender,
        description,
        detail_url: detail_url.to_string(),
    })
}

fn first<'a>(document: &'a Html, css: &str) -> Result<Option<ElementRef<'a>>> {
    Ok(document.select(&selector(css)?).next())
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text of a `Label:: value` span with the separator removed
fn labeled_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().replace("::", "").trim().to_string()
}

/// Every text node trimmed, then joined without separators
fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://toolkit.rescuegroups.org/iframe/fb/v3.0/";

    #[test]
    fn test_listing_url() {
        assert_eq!(
            listing_url(BASE, 2, "925", "Rabbit"),
            "https://toolkit.rescuegroups.org/iframe/fb/v3.0/?breed=&age=&sex=&page=2&ids=925&locationid=&species=Rabbit"
        );
    }

    #[test]
    fn test_extract_detail_links() {
        let html = r#"
            <table><tr>
              <td class="searchResultsCell"><a class="petName" href="?action=pet&amp;petid=1">Luna</a></td>
              <td class="searchResultsCell"><span>No link here</span></td>
              <td class="searchResultsCell"><a class="petName" href="https://other.example/pet/2">Pip</a></td>
              <td class="otherCell"><a class="petName" href="/ignored">X</a></td>
            </tr></table>
        "#;

        let links = extract_detail_links(html, BASE).unwrap();
        assert_eq!(
            links,
            vec![
                "https://toolkit.rescuegroups.org/iframe/fb/v3.0/?action=pet&petid=1".to_string(),
                "https://other.example/pet/2".to_string(),
            ]
        );
    }

    #[test]
    fn test_extract_detail_links_bad_base() {
        assert!(extract_detail_links("<html></html>", "not a url").is_err());
    }

    #[test]
    fn test_extract_record() {
        let html = r#"
            <html><body>
              <div class="pageCenterTitle">  Luna  </div>
              <span id="rgPetDetailsBreed">Holland Lop</span>
              <span id="rgPetDetailsSex">:: Female</span>
              <span id="rgPetDetailsAge">::2 years </span>
              <div class="rgDescription">
                <p> Friendly and </p>
                <p>litter-trained. </p>
              </div>
            </body></html>
        "#;

        let record = extract_record(html, "https://example.org/pet/1").unwrap();
        assert_eq!(record.name, "Luna");
        assert_eq!(record.pet_type, "Holland Lop");
        assert_eq!(record.gender, "Female");
        assert_eq!(record.age, "2 years");
        assert_eq!(record.description, "Friendly andlitter-trained.");
        assert_eq!(record.detail_url, "https://example.org/pet/1");
    }

    #[test]
    fn test_extract_record_missing_fields() {
        let html = r#"<html><body><div class="pageCenterTitle">Pip</div></body></html>"#;
        let record = extract_record(html, "https://example.org/pet/2").unwrap();
        assert_eq!(record.name, "Pip");
        assert!(record.pet_type.is_empty());
        assert!(record.age.is_empty());
        assert!(record.gender.is_empty());
        assert!(record.description.is_empty());
    }
}
