use url::Url;

use super::{
    blacklist::Blacklist,
    normalizer::{canonical_https, normalize_domain},
};

const FILE_SUFFIXES: [&str; 5] = [".pdf", ".doc", ".docx", ".xls", ".xlsx"];

pub const NO_ACCEPTABLE_RESULT: &str = "no_acceptable_result";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionResult {
    pub website: String,
    pub debug_note: String,
}

impl SelectionResult {
    fn picked(domain: &str) -> Self {
        SelectionResult {
            website: canonical_https(domain),
            debug_note: format!("picked={}", domain),
        }
    }

    fn nothing_acceptable() -> Self {
        SelectionResult {
            website: String::new(),
            debug_note: NO_ACCEPTABLE_RESULT.to_string(),
        }
    }

    pub fn is_found(&self) -> bool {
        !self.website.is_empty()
    }
}

fn ends_with_file_suffix(value: &str) -> bool {
    let value = value.to_lowercase();
    FILE_SUFFIXES.iter().any(|suffix| value.ends_with(suffix))
}

fn is_document_link(href: &str) -> bool {
    let href = href.trim();
    ends_with_file_suffix(href)
        || match Url::parse(href) {
            Ok(parsed_url) => ends_with_file_suffix(parsed_url.path()),
            Err(_) => false,
        }
}

/// Greedy pick: the first href that is not a document, normalizes to a domain
/// and is not blacklisted wins. Order is whatever the search engine returned.
pub fn choose_best_candidate(hrefs: &[String], blacklist: &Blacklist) -> SelectionResult {
    for href in hrefs {
        if is_document_link(href) {
            log::debug!("Skipping document link {}", href);
            continue;
        }

        let domain = normalize_domain(href);
        if domain.is_empty() {
            log::debug!("Skipping unparseable link {}", href);
            continue;
        }

        if blacklist.is_blocked(&domain) {
            log::debug!("Skipping blacklisted domain {}", domain);
            continue;
        }

        return SelectionResult::picked(&domain);
    }

    SelectionResult::nothing_acceptable()
}

#[cfg(test)]
mod tests {
    use crate::domain::blacklist::{load_blacklist_rules, Blacklist};

    use super::{choose_best_candidate, SelectionResult};

    fn hrefs(links: &[&str]) -> Vec<String> {
        links.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn picks_first_acceptable_link() {
        let links = hrefs(&[
            "http://facebook.com/x",
            "https://acme.co/about",
            "https://acme.co/brochure.pdf",
        ]);

        let result = choose_best_candidate(&links, &Blacklist::default());

        assert_eq!(
            result,
            SelectionResult {
                website: "https://acme.co".to_string(),
                debug_note: "picked=acme.co".to_string(),
            }
        );
        assert!(result.is_found());
    }

    #[test]
    fn keeps_search_engine_order() {
        let links = hrefs(&["https://www.second-best.com/", "https://acme.co"]);
        let result = choose_best_candidate(&links, &Blacklist::default());

        assert_eq!(result.website, "https://second-best.com");
    }

    #[test]
    fn nothing_acceptable() {
        let blacklist = Blacklist::default();
        let expected = SelectionResult {
            website: "".to_string(),
            debug_note: "no_acceptable_result".to_string(),
        };

        assert_eq!(choose_best_candidate(&[], &blacklist), expected);
        assert_eq!(
            choose_best_candidate(
                &hrefs(&["https://www.linkedin.com/company/acme", "http://yelp.com/biz/acme"]),
                &blacklist
            ),
            expected
        );
        assert_eq!(
            choose_best_candidate(
                &hrefs(&[
                    "https://acme.co/Report.PDF",
                    "https://acme.co/sheet.xlsx",
                    "https://acme.co/letter.docx?download=1",
                ]),
                &blacklist
            ),
            expected
        );
        assert!(!expected.is_found());
    }

    #[test]
    fn skips_unparseable_links() {
        let links = hrefs(&["", "not a url", "https://acme.co"]);
        let result = choose_best_candidate(&links, &Blacklist::default());

        assert_eq!(result.debug_note, "picked=acme.co");
    }

    #[test]
    fn skips_www_only_host_with_port() {
        let links = hrefs(&["http://www.:8080/", "https://acme.co/contact"]);
        let result = choose_best_candidate(&links, &Blacklist::default());

        assert_eq!(result.website, "https://acme.co");
        assert_eq!(result.debug_note, "picked=acme.co");
    }

    #[test]
    fn loaded_rules_are_applied() {
        let values: Vec<Vec<String>> = [
            ["rule_type", "match_value", "enabled"],
            ["EXACT_DOMAIN", "manta.com", "TRUE"],
            ["DOMAIN_CONTAINS", "directory", "TRUE"],
        ]
        .iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect();
        let blacklist = Blacklist::from_rules(load_blacklist_rules(&values).unwrap());

        let links = hrefs(&[
            "https://www.manta.com/c/acme",
            "https://texasdirectory.org/acme",
            "https://acmeplumbing.com/",
        ]);
        let result = choose_best_candidate(&links, &blacklist);

        assert_eq!(result.website, "https://acmeplumbing.com");
        assert_eq!(result.debug_note, "picked=acmeplumbing.com");
    }
}
