//! Integration tests for the manuscript resolver
//!
//! These tests drive the resolver end to end against the in-memory transport,
//! laid out the way the OPenn repository lays out its files.

use openn_resolver::app::client::mock::RequestKind;
use openn_resolver::app::{
    date_added, date_created, date_updated, ManuscriptResolver, MockTransport, ObjectPath,
    ResolverConfig,
};
use openn_resolver::errors::{AppError, CollectionsError, FetchError, ManifestError};
use tracing_test::traced_test;

const DATA: &str = "https://openn.library.upenn.edu/Data";
const WALTERS: &str =
    "https://openn.library.upenn.edu/Data/0020/Data/WaltersManuscripts/ManuscriptDescriptions";

fn path(s: &str) -> ObjectPath {
    ObjectPath::new(s).unwrap()
}

fn resolver(transport: MockTransport) -> ManuscriptResolver<MockTransport> {
    ManuscriptResolver::with_transport(transport, ResolverConfig::default())
}

fn tei_with_lang(lang: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<TEI xmlns="http://www.tei-c.org/ns/1.0">
  <teiHeader>
    <fileDesc>
      <sourceDesc>
        <msDesc>
          <msContents>
            <textLang mainLang="{lang}">Latin</textLang>
          </msContents>
        </msDesc>
      </sourceDesc>
    </fileDesc>
  </teiHeader>
</TEI>"#
    )
}

#[tokio::test]
async fn test_page_count_without_manifest_fails() {
    let r = resolver(MockTransport::new());

    let result = r.page_count(&path("0001/ljs103")).await;
    match result {
        Err(AppError::Manifest(ManifestError::NoManifest { object_path })) => {
            assert_eq!(object_path, "0001/ljs103");
        }
        other => panic!("Expected NoManifest, got {:?}", other),
    }

    // Both candidates checked, nothing fetched
    assert_eq!(r.transport().requests().len(), 2);
    assert!(r.transport().fetched().is_empty());
}

#[tokio::test]
async fn test_sha1_manifest_preferred() {
    let sha1 = format!("{DATA}/0001/ljs103/manifest-sha1.txt");
    let md5 = format!("{DATA}/0001/ljs103/manifest-md5.txt");
    let r = resolver(
        MockTransport::new()
            .with_document(&sha1, "a data/master/1.tif\n")
            .with_document(&md5, "a data/master/1.tif\nb data/master/2.tif\n"),
    );

    let url = r.find_manifest_url(&path("0001/ljs103")).await.unwrap();
    assert_eq!(url.unwrap().as_str(), sha1);

    assert_eq!(r.page_count(&path("0001/ljs103")).await.unwrap(), 1);
    assert_eq!(r.transport().fetched(), vec![sha1]);
}

#[tokio::test]
async fn test_md5_manifest_fallback() {
    let md5 = format!("{DATA}/0020/W168/manifest-md5.txt");
    let manifest = "\
bf2980cf7c91b210cd45d94665de8158 data/W.168/thumb/W168_000204_thumb.jpg
8b8d15a7d1ed72bd0964ecce0c2b9601 data/W.168/sap/W168_000012_sap.jpg
384055e9d9a5f153f5eb0292b0d56502 data/W.168/master/W168_000229_600.tif
484055e9d9a5f153f5eb0292b0d56503 data/W.168/master/W168_000230_600.tif
";
    let r = resolver(MockTransport::new().with_document(&md5, manifest));

    assert_eq!(r.page_count(&path("0020/W168")).await.unwrap(), 2);
}

#[tokio::test]
async fn test_redirected_manifest_is_not_found() {
    let sha1 = format!("{DATA}/0001/ljs1/manifest-sha1.txt");
    let md5 = format!("{DATA}/0001/ljs1/manifest-md5.txt");
    let r = resolver(
        MockTransport::new()
            .with_status(&sha1, 301)
            .with_document(&md5, "h data/master/x.jpg\n"),
    );

    let url = r.find_manifest_url(&path("0001/ljs1")).await.unwrap();
    assert_eq!(url.unwrap().as_str(), md5);
}

#[tokio::test]
async fn test_page_count_example_manifest() {
    let sha1 = format!("{DATA}/0001/ljs103/manifest-sha1.txt");
    let r = resolver(MockTransport::new().with_document(
        &sha1,
        "h1 data/master/a.tif\nh2 data/web/b.jpg\nh3 data/W.168/master/c.jpg\n",
    ));

    assert_eq!(r.page_count(&path("0001/ljs103")).await.unwrap(), 2);
}

#[tokio::test]
async fn test_walters_tei_location() {
    let tei = format!("{WALTERS}/W4_tei.xml");
    let r = resolver(MockTransport::new().with_document(&tei, tei_with_lang("ara")));

    let url = r.find_tei_url(&path("0020/W4")).await.unwrap();
    assert_eq!(url.unwrap().as_str(), tei);

    let requested = r.transport().requests();
    assert_eq!(requested, vec![(RequestKind::Head, tei.clone())]);
    assert!(!requested[0].1.contains("/data/W4_TEI.xml"));
}

#[tokio::test]
async fn test_generic_tei_location() {
    let tei = format!("{DATA}/0022/mssHM_9999/data/mssHM_9999_TEI.xml");
    let r = resolver(MockTransport::new().with_document(&tei, tei_with_lang("eng")));

    let url = r.find_tei_url(&path("0022/mssHM_9999")).await.unwrap();
    assert_eq!(url.unwrap().as_str(), tei);
}

#[tokio::test]
async fn test_missing_tei_is_absent_not_error() {
    let r = resolver(MockTransport::new());

    assert_eq!(r.find_tei_url(&path("0001/ljs9")).await.unwrap(), None);
    assert_eq!(r.main_language(&path("0001/ljs9")).await.unwrap(), None);
    assert_eq!(r.main_language_scan(&path("0001/ljs9")).await.unwrap(), None);
    assert!(r.tei(&path("0001/ljs9")).await.unwrap().is_none());
    assert!(r.transport().fetched().is_empty());
}

#[tokio::test]
async fn test_main_language_trimmed() {
    let tei = format!("{DATA}/0001/ljs103/data/ljs103_TEI.xml");
    let r = resolver(MockTransport::new().with_document(&tei, tei_with_lang("  lat ")));

    assert_eq!(
        r.main_language(&path("0001/ljs103")).await.unwrap(),
        Some("lat".to_string())
    );
    assert_eq!(
        r.main_language_scan(&path("0001/ljs103")).await.unwrap(),
        Some("lat".to_string())
    );
}

#[tokio::test]
#[traced_test]
async fn test_main_language_missing_attribute_warns() {
    let tei = format!("{DATA}/0001/ljs104/data/ljs104_TEI.xml");
    let r = resolver(
        MockTransport::new().with_document(&tei, "<TEI><textLang>Latin</textLang></TEI>"),
    );

    assert_eq!(r.main_language(&path("0001/ljs104")).await.unwrap(), None);
    assert!(logs_contain("No mainLang found for 0001/ljs104"));
    logs_assert(|lines: &[&str]| {
        let warnings = lines
            .iter()
            .filter(|line| line.contains("No mainLang found for 0001/ljs104"))
            .count();
        if warnings == 1 {
            Ok(())
        } else {
            Err(format!("expected one warning, saw {warnings}"))
        }
    });
}

#[tokio::test]
#[traced_test]
async fn test_main_language_scan_missing_attribute_warns() {
    let tei = format!("{DATA}/0001/ljs104/data/ljs104_TEI.xml");
    let r = resolver(
        MockTransport::new().with_document(&tei, "<TEI><textLang>Latin</textLang></TEI>"),
    );

    assert_eq!(r.main_language_scan(&path("0001/ljs104")).await.unwrap(), None);
    assert!(logs_contain("No mainLang found for 0001/ljs104"));
    assert!(logs_contain("WARN"));
}

#[tokio::test]
#[traced_test]
async fn test_missing_tei_does_not_warn() {
    let r = resolver(MockTransport::new());

    assert_eq!(r.main_language(&path("0001/ljs104")).await.unwrap(), None);
    assert_eq!(r.main_language_scan(&path("0001/ljs104")).await.unwrap(), None);
    assert!(!logs_contain("No mainLang found"));
}

#[tokio::test]
async fn test_blank_main_lang_skipped() {
    let tei = format!("{DATA}/0001/ljs106/data/ljs106_TEI.xml");
    let r = resolver(MockTransport::new().with_document(
        &tei,
        r#"<TEI><textLang mainLang=""/><textLang mainLang="lat">Latin</textLang></TEI>"#,
    ));

    assert_eq!(
        r.main_language(&path("0001/ljs106")).await.unwrap(),
        Some("lat".to_string())
    );
    assert_eq!(
        r.main_language_scan(&path("0001/ljs106")).await.unwrap(),
        Some("lat".to_string())
    );
}

#[tokio::test]
async fn test_malformed_tei_propagates() {
    let tei = format!("{DATA}/0001/ljs105/data/ljs105_TEI.xml");
    let r = resolver(MockTransport::new().with_document(&tei, "<TEI><textLang></TEI>"));

    let result = r.main_language(&path("0001/ljs105")).await;
    assert!(matches!(result, Err(AppError::Tei(_))));
}

#[tokio::test]
async fn test_collections_index() {
    let csv = "\
repository_id,name,added,document_created,created,document_updated
1,Penn,2014-05-01,2013-01-01,,2019-09-09
2,Other,2015-01-01,2014-01-01,2014-02-02,
1,Penn (revised),2014-05-02,2013-01-02,,2020-10-10
";
    let r = resolver(MockTransport::new().with_document(format!("{DATA}/collections.csv"), csv));

    let index = r.collections_index().await.unwrap();
    assert_eq!(index.len(), 2);

    let penn = index.get("1").unwrap();
    assert_eq!(penn.get("name"), Some("Penn (revised)"));
    assert_eq!(date_added(penn), Some("2014-05-02"));
    assert_eq!(date_created(penn), Some("2013-01-02"));
    assert_eq!(date_updated(penn), Some("2020-10-10"));

    let other = index.get("2").unwrap();
    assert_eq!(date_created(other), Some("2014-02-02"));
    assert_eq!(date_updated(other), None);
}

#[tokio::test]
async fn test_collections_without_id_column() {
    let r = resolver(
        MockTransport::new().with_document(format!("{DATA}/collections.csv"), "name\nPenn\n"),
    );

    let result = r.collections_index().await;
    assert!(matches!(
        result,
        Err(AppError::Collections(CollectionsError::MissingColumn { .. }))
    ));
}

#[tokio::test]
async fn test_repository_contents() {
    let csv = "document_id,path,title\n1,0007/mscodex1,Codex one\n2,0007/mscodex2,Codex two\n";
    let r = resolver(MockTransport::new().with_document(format!("{DATA}/0007_contents.csv"), csv));

    let rows = r.repository_contents("7").await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].get("path"), Some("0007/mscodex2"));
}

#[tokio::test]
async fn test_fetch_failure_propagates() {
    // HEAD answers 200 but the body cannot be fetched
    let sha1 = format!("{DATA}/0001/ljs7/manifest-sha1.txt");
    let r = resolver(MockTransport::new().with_status(&sha1, 200));

    let result = r.page_count(&path("0001/ljs7")).await;
    assert!(matches!(
        result,
        Err(AppError::Fetch(FetchError::Unavailable { .. }))
    ));
}

#[tokio::test]
async fn test_summarize() {
    let sha1 = format!("{DATA}/0001/ljs103/manifest-sha1.txt");
    let tei = format!("{DATA}/0001/ljs103/data/ljs103_TEI.xml");
    let r = resolver(
        MockTransport::new()
            .with_document(&sha1, "a data/master/1.tif\nb data/master/2.tif\nc data/web/1.jpg\n")
            .with_document(&tei, tei_with_lang("lat")),
    );

    let summary = r.summarize(&path("0001/ljs103")).await.unwrap();
    assert_eq!(summary.repository, "0001");
    assert_eq!(summary.page_count, Some(2));
    assert_eq!(summary.manifest_url.as_deref(), Some(sha1.as_str()));
    assert_eq!(summary.tei_url.as_deref(), Some(tei.as_str()));
    assert_eq!(summary.main_language.as_deref(), Some("lat"));

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["object_path"], "0001/ljs103");
    assert_eq!(json["page_count"], 2);
}

#[tokio::test]
async fn test_summarize_without_files() {
    let r = resolver(MockTransport::new());

    let summary = r.summarize(&path("0042/nothing")).await.unwrap();
    assert_eq!(summary.page_count, None);
    assert_eq!(summary.manifest_url, None);
    assert_eq!(summary.main_language, None);
}

#[tokio::test]
async fn test_custom_mirror_roots() {
    let config = ResolverConfig {
        data_url: "http://mirror.local/Data/".to_string(),
        ..Default::default()
    };
    let sha1 = "http://mirror.local/Data/0001/ljs1/manifest-sha1.txt";
    let r = ManuscriptResolver::with_transport(
        MockTransport::new().with_document(sha1, "a data/master/1.jpg\n"),
        config,
    );

    assert_eq!(r.page_count(&path("0001/ljs1")).await.unwrap(), 1);
}

#[test]
fn test_block_on_with_tokio_test() {
    let r = resolver(MockTransport::new());
    let found = tokio_test::block_on(r.find_manifest_url(&path("0001/none"))).unwrap();
    assert!(found.is_none());
}
