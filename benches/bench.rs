use criterion::{Criterion, criterion_group, criterion_main};
use crossword_solver::crossword::Crossword;
use crossword_solver::crossword::structure::Structure;
use crossword_solver::csp::backtracking::Backtracking;
use crossword_solver::csp::consistency::{ArcQueue, ArcStack, ArcWorklist};
use crossword_solver::csp::solver::{Solver, SolverConfig};
use crossword_solver::csp::value_ordering::{
    DomainOrder, LeastConstrainingValue, RandomValues, ValueOrdering,
};
use crossword_solver::csp::variable_selection::{
    FixedOrder, MinimumRemainingValues, RandomOrder, VariableSelection,
};
use crossword_solver::csp::word::WordList;
use std::fmt::Debug;
use std::hint::black_box;
use std::marker::PhantomData;
use std::time::Duration;

const STRUCTURE: &str = "\
#___#
#_##_
#_##_
#_##_
#____
";

const CROSSWORD: &str = "\
_____
_#_#_
_____
_#_#_
_____
";

const WORDS: &str = "\
one two three four five six seven eight nine ten
ace act add age ago aid aim air ale all and ant any ape arc are ark arm art ash ask ate awe axe
bad bag ban bar bat bay bed bee beg bet bid big bin bit boa bog bow box boy bud bug bun bus but
cab can cap car cat cow cry cub cue cup cut dab dam day den dew did die dig dim dip doe dog dot
dry due dug dye ear eat ebb egg ego elf elk elm end era eve ewe eye fan far fat fed fee few fig
fin fit fix fly foe fog for fox fry fun fur gap gas gel gem get gin got gum gun gut guy gym
able acid aged also area army away baby back ball band bank base bath bear beat been beer bell
belt best bill bird blow blue boat body bomb bond bone book boom born boss both bowl bulk burn
bush busy call calm came camp card care case cash cast cell chat chip city club coal coat code
cold come cook cool cope copy core cost crew crop dark data date dawn days dead deal dean dear
debt deep deny desk dial diet disc disk does done door dose down draw drew drop drug dual duke
about above abuse actor acute admit adopt adult after again agent agree ahead alarm album alert
alike alive allow alone along alter among anger angle angry apart apple apply arena argue arise
array aside asset audio audit avoid award aware badly baker bases basic basis beach began begin
begun being below bench billy birth black blame blind block blood board boost booth bound brain
brand bread break breed brief bring broad broke brown build built buyer cable calif carry catch
cause chain chair chart chase cheap check chest chief child china chose civil claim class clean
clear click clock close coach coast could count court cover craft crash cream crime cross crowd
crown curve cycle daily dance dated dealt death debut delay depth doing doubt dozen draft drama
drawn dream dress drill drink drive drove dying eager early earth eight elite empty enemy enjoy
enter entry equal error event every exact exist extra faith false fault fiber field fifth fifty
";

#[derive(Debug, Clone)]
struct SelectorConfig<V: VariableSelection>(PhantomData<V>);

impl<V: VariableSelection + Default + Clone> SolverConfig for SelectorConfig<V> {
    type VariableSelector = V;
    type ValueOrderer = LeastConstrainingValue;
    type Worklist = ArcQueue;
}

#[derive(Debug, Clone)]
struct OrderingConfig<O: ValueOrdering>(PhantomData<O>);

impl<O: ValueOrdering + Default + Clone> SolverConfig for OrderingConfig<O> {
    type VariableSelector = MinimumRemainingValues;
    type ValueOrderer = O;
    type Worklist = ArcQueue;
}

#[derive(Debug, Clone)]
struct WorklistConfig<W: ArcWorklist>(PhantomData<W>);

impl<W: ArcWorklist + Clone> SolverConfig for WorklistConfig<W> {
    type VariableSelector = MinimumRemainingValues;
    type ValueOrderer = LeastConstrainingValue;
    type Worklist = W;
}

fn puzzles() -> Vec<Crossword> {
    let words = WORDS
        .split_whitespace()
        .map(str::to_uppercase)
        .collect::<WordList>();
    [STRUCTURE, CROSSWORD]
        .into_iter()
        .map(|s| Crossword::new(Structure::parse(s), words.clone()))
        .collect()
}

fn solve_all<Config: SolverConfig>(puzzles: &[Crossword]) {
    for crossword in puzzles {
        let Ok(model) = crossword.model() else {
            continue;
        };
        let mut solver: Backtracking<Config> = Solver::new(model, crossword.words().clone());
        black_box(solver.solve());
    }
}

fn bench_crossword(c: &mut Criterion) {
    let puzzles = puzzles();

    let mut group = c.benchmark_group("crossword - variable selection");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(10));
    group.bench_function("MRV", |b| {
        b.iter(|| solve_all::<SelectorConfig<MinimumRemainingValues>>(&puzzles));
    });
    group.bench_function("Fixed", |b| {
        b.iter(|| solve_all::<SelectorConfig<FixedOrder>>(&puzzles));
    });
    group.bench_function("Random", |b| {
        b.iter(|| solve_all::<SelectorConfig<RandomOrder>>(&puzzles));
    });
    group.finish();

    let mut group = c.benchmark_group("crossword - value ordering");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(10));
    group.bench_function("LCV", |b| {
        b.iter(|| solve_all::<OrderingConfig<LeastConstrainingValue>>(&puzzles));
    });
    group.bench_function("Domain", |b| {
        b.iter(|| solve_all::<OrderingConfig<DomainOrder>>(&puzzles));
    });
    group.bench_function("Random", |b| {
        b.iter(|| solve_all::<OrderingConfig<RandomValues>>(&puzzles));
    });
    group.finish();

    let mut group = c.benchmark_group("crossword - AC-3 worklist");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(10));
    group.bench_function("Queue", |b| {
        b.iter(|| solve_all::<WorklistConfig<ArcQueue>>(&puzzles));
    });
    group.bench_function("Stack", |b| {
        b.iter(|| solve_all::<WorklistConfig<ArcStack>>(&puzzles));
    });
    group.finish();
}

criterion_group!(benches, bench_crossword);

criterion_main!(benches);
