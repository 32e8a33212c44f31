use std::{
    cell::RefCell,
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use laads_aux::{
    find_product_file, Archive, Combiner, FuseInputs, LaadsError, LaadsResult, Product,
    RemoteArchive, TargetDate,
};
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    List(Product, TargetDate),
    Fetch(Product, TargetDate, String),
}

/// Canned listings and file contents, recording every request.
#[derive(Default)]
struct FakeRemote {
    listings: HashMap<&'static str, Vec<String>>,
    calls: Vec<Call>,
}

impl FakeRemote {
    fn with_listing(mut self, prod: Product, names: &[&str]) -> Self {
        self.listings
            .insert(prod.code(), names.iter().map(|n| n.to_string()).collect());
        self
    }
}

impl RemoteArchive for FakeRemote {
    fn retrieve_remote_filenames(
        &mut self,
        prod: Product,
        date: TargetDate,
    ) -> LaadsResult<Vec<String>> {
        self.calls.push(Call::List(prod, date));
        Ok(self.listings.get(prod.code()).cloned().unwrap_or_default())
    }

    fn retrieve_remote_file(
        &mut self,
        prod: Product,
        date: TargetDate,
        remote_fname: &str,
    ) -> LaadsResult<Vec<u8>> {
        self.calls
            .push(Call::Fetch(prod, date, remote_fname.to_owned()));
        Ok(format!("contents of {}", remote_fname).into_bytes())
    }
}

/// Scrapes a canned HTML page the way the HTTP data pool is scraped.
struct FakeListingPage {
    page: String,
}

impl RemoteArchive for FakeListingPage {
    fn retrieve_remote_filenames(
        &mut self,
        prod: Product,
        _date: TargetDate,
    ) -> LaadsResult<Vec<String>> {
        Ok(vec![find_product_file(&self.page, prod)?])
    }

    fn retrieve_remote_file(
        &mut self,
        _prod: Product,
        _date: TargetDate,
        _remote_fname: &str,
    ) -> LaadsResult<Vec<u8>> {
        Ok(b"cmg".to_vec())
    }
}

#[derive(Default)]
struct FakeCombiner {
    calls: RefCell<Vec<(FuseInputs, PathBuf, Vec<String>)>>,
    fail: bool,
}

impl Combiner for FakeCombiner {
    fn combine(&self, inputs: &FuseInputs, output_dir: &Path) -> LaadsResult<()> {
        let contents: Vec<String> = inputs
            .paths()
            .iter()
            .map(|p| fs::read_to_string(p).unwrap())
            .collect();
        self.calls
            .borrow_mut()
            .push((inputs.clone(), output_dir.to_path_buf(), contents));

        if self.fail {
            Err(LaadsError::ExternalTool("combine_l8_aux_data exited with 1".into()))
        } else {
            fs::write(output_dir.join("CMG_CMA.2020197.hdf_fused"), b"fused").unwrap();
            Ok(())
        }
    }
}

const TERRA_CMG: &str = "MOD09CMG.A2020197.006.2020199031234.hdf";
const AQUA_CMG: &str = "MYD09CMG.A2020197.006.2020199042211.hdf";
const TERRA_CMA: &str = "MOD09CMA.A2020197.006.2020199013000.hdf";
const AQUA_CMA: &str = "MYD09CMA.A2020197.006.2020199014500.hdf";

fn date() -> TargetDate {
    TargetDate::parse("2020-07-15").unwrap()
}

fn cmg_remote() -> FakeRemote {
    FakeRemote::default()
        .with_listing(Product::TerraCmg, &[TERRA_CMG])
        .with_listing(Product::AquaCmg, &[AQUA_CMG])
}

fn cma_remote() -> FakeRemote {
    FakeRemote::default()
        .with_listing(Product::TerraCma, &[TERRA_CMA, "MOD09CMA.A2020197.006.2020201000000.hdf"])
        .with_listing(Product::AquaCma, &[AQUA_CMA])
}

fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn downloads_fuses_and_cleans_up() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("LADS");
    let archive = Archive::connect(&root).unwrap();

    let mut cmg = cmg_remote();
    let mut cma = cma_remote();
    let combiner = FakeCombiner::default();

    let inputs = archive
        .download_laads(date(), &mut cmg, &mut cma, &combiner)
        .unwrap();

    assert_eq!(
        cmg.calls,
        vec![
            Call::List(Product::TerraCmg, date()),
            Call::Fetch(Product::TerraCmg, date(), TERRA_CMG.into()),
            Call::List(Product::AquaCmg, date()),
            Call::Fetch(Product::AquaCmg, date(), AQUA_CMG.into()),
        ]
    );
    // First listed entry wins.
    assert_eq!(
        cma.calls,
        vec![
            Call::List(Product::TerraCma, date()),
            Call::Fetch(Product::TerraCma, date(), TERRA_CMA.into()),
            Call::List(Product::AquaCma, date()),
            Call::Fetch(Product::AquaCma, date(), AQUA_CMA.into()),
        ]
    );

    let calls = combiner.calls.borrow();
    assert_eq!(calls.len(), 1);
    let (combined, output_dir, contents) = &calls[0];
    assert_eq!(combined, &inputs);
    assert_eq!(output_dir, &root);
    assert_eq!(inputs.terra_cmg, root.join(TERRA_CMG));
    assert_eq!(inputs.terra_cma, root.join(TERRA_CMA));
    assert_eq!(inputs.aqua_cma, root.join(AQUA_CMA));
    assert_eq!(inputs.aqua_cmg, root.join(AQUA_CMG));
    assert_eq!(contents[0], format!("contents of {}", TERRA_CMG));

    assert_eq!(dir_entries(&root), vec!["CMG_CMA.2020197.hdf_fused".to_owned()]);
}

#[test]
fn failed_combine_leaves_downloads_in_place() {
    let tmp = TempDir::new().unwrap();
    let archive = Archive::connect(tmp.path()).unwrap();

    let combiner = FakeCombiner {
        fail: true,
        ..FakeCombiner::default()
    };
    let result = archive.download_laads(date(), &mut cmg_remote(), &mut cma_remote(), &combiner);

    assert!(matches!(result, Err(LaadsError::ExternalTool(_))));
    assert_eq!(
        dir_entries(tmp.path()),
        vec![TERRA_CMA, TERRA_CMG, AQUA_CMA, AQUA_CMG]
    );
}

#[test]
fn empty_cma_listing_aborts_before_fusing() {
    let tmp = TempDir::new().unwrap();
    let archive = Archive::connect(tmp.path()).unwrap();

    let mut cma = FakeRemote::default()
        .with_listing(Product::TerraCma, &[TERRA_CMA])
        .with_listing(Product::AquaCma, &[]);
    let combiner = FakeCombiner::default();

    let result = archive.download_laads(date(), &mut cmg_remote(), &mut cma, &combiner);

    assert!(matches!(result, Err(LaadsError::NotFound(_))));
    assert_eq!(cma.calls.last(), Some(&Call::List(Product::AquaCma, date())));
    assert!(combiner.calls.borrow().is_empty());
    // Nothing is rolled back.
    assert_eq!(dir_entries(tmp.path()), vec![TERRA_CMA, TERRA_CMG, AQUA_CMG]);
}

#[test]
fn listing_without_a_match_aborts_the_run() {
    let tmp = TempDir::new().unwrap();
    let archive = Archive::connect(tmp.path()).unwrap();

    let page = format!(r#"<a href="{0}">{0}</a>"#, TERRA_CMG);
    let mut cmg = FakeListingPage { page };
    let mut cma = cma_remote();
    let combiner = FakeCombiner::default();

    let result = archive.download_laads(date(), &mut cmg, &mut cma, &combiner);

    match result {
        Err(LaadsError::NotFound(msg)) => assert!(msg.contains("MYD09CMG")),
        other => panic!("expected not found, got {:?}", other),
    }
    assert!(cma.calls.is_empty());
    assert_eq!(dir_entries(tmp.path()), vec![TERRA_CMG]);
}

#[test]
fn unavailable_dates_touch_nothing() {
    let tmp = TempDir::new().unwrap();
    let archive = Archive::connect(tmp.path()).unwrap();

    let mut cmg = cmg_remote();
    let mut cma = cma_remote();
    let combiner = FakeCombiner::default();
    let early = TargetDate::parse("1999-12-31").unwrap();

    assert!(archive
        .download_laads(early, &mut cmg, &mut cma, &combiner)
        .is_err());
    assert!(cmg.calls.is_empty());
    assert!(cma.calls.is_empty());
}
