use raptor_scaffold::hic::GaConfig;
use raptor_scaffold::io::agp::AgpConfig;
use raptor_scaffold::pipeline::agp::run_agp;
use raptor_scaffold::pipeline::load_orderings;
use raptor_scaffold::pipeline::score::run_score;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_fixture(dir: &Path) {
    let orderings = dir.join("orderings");
    fs::create_dir(&orderings).unwrap();
    fs::write(
        orderings.join("group10.ordering"),
        "#Contig_ID\tContig_name\tContig_rc\tOrientation_Q_score\tGap_size_after_contig\n\
         3\ttig3|arrow\t0\t-\t0\n\
         4\ttig4\t1\t-\t0\n",
    )
    .unwrap();
    fs::write(
        orderings.join("group2.ordering"),
        "0\ttig0\t0\t-\t0\n\
         2\ttig2\t1\t-\t0\n\
         1\ttig1\t0\t-\t0\n",
    )
    .unwrap();

    fs::write(
        dir.join("contigs.sizes"),
        "tig0\t1000\ntig1\t1000\ntig2\t1000\ntig3\t500\ntig4\t500\ntig5\t200\n",
    )
    .unwrap();

    // tig0-tig1-tig2 is the best chain
    fs::write(
        dir.join("contacts.glm"),
        "X\tY\tZ\n0\t1\t80\n1\t0\t80\n1\t2\t80\n2\t1\t80\n0\t2\t5\n2\t0\t5\n3\t4\t40\n4\t3\t40\n",
    )
    .unwrap();
}

#[test]
fn test_orderings_load_in_natural_order() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());
    let orderings = load_orderings(&dir.path().join("orderings")).unwrap();
    let names: Vec<&str> = orderings.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["group2", "group10"]);
    assert_eq!(orderings[1].contig_names(), vec!["tig3", "tig4"]);
}

#[test]
fn test_agp_from_orderings() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());
    let out = dir.path().join("out.agp");

    let written = run_agp(
        &dir.path().join("orderings"),
        &dir.path().join("contigs.sizes"),
        &out,
        &AgpConfig::default(),
    )
    .unwrap();

    let agp = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = agp.lines().collect();
    assert_eq!(written, lines.len());
    // 3 contigs + 2 gaps, 2 contigs + 1 gap, 1 singleton
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "group2\t1\t1000\t1\tW\ttig0\t1\t1000\t+");
    assert_eq!(lines[1], "group2\t1001\t1100\t2\tU\t100\tcontig\tno\tna");
    assert_eq!(lines[2], "group2\t1101\t2100\t3\tW\ttig2\t1\t1000\t-");
    assert_eq!(lines[5], "group10\t1\t500\t1\tW\ttig3\t1\t500\t+");
    assert_eq!(lines[8], "tig5\t1\t200\t1\tW\ttig5\t1\t200\t?");
}

#[test]
fn test_score_writes_tour_files() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());
    let outdir = dir.path().join("tours");
    let config = GaConfig {
        npop: 20,
        ngen: 40,
        stall: 15,
        ..GaConfig::default()
    };

    let scores = run_score(
        &dir.path().join("orderings"),
        &dir.path().join("contacts.glm"),
        &dir.path().join("contigs.sizes"),
        &outdir,
        &config,
    )
    .unwrap();

    assert_eq!(scores.len(), 2);
    assert_eq!(scores[0].group, "group2");
    assert!(scores.iter().all(|s| s.fitness >= s.initial_fitness));

    let tour = fs::read_to_string(outdir.join("group2.tour")).unwrap();
    let lines: Vec<&str> = tour.lines().collect();
    assert!(lines[0].starts_with(">GA-0-"));
    let last = lines[lines.len() - 1];
    assert_eq!(last, scores[0].tour.join(" "));
    // tig1 sits between its two neighbours in any optimal tour
    let order: Vec<&str> = last.split(' ').collect();
    assert_eq!(order[1], "tig1+");
}
