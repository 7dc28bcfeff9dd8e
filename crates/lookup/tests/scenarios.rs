//! End-to-end lookups composed with the guard adapters.

use std::cell::Cell;
use std::num::ParseIntError;

use pluck_guard::{AccessChain, AttemptCatchExt};
use pluck_lookup::{LookupError, Predicate, QuerySource, SequenceExt, VecSource, predicate};
use pluck_primitives::{Cardinality, Element, ElementError, SingleElementResult};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn init_tracing() {
	let _ = tracing_subscriber::fmt::try_init();
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct User {
	id: u32,
	name: &'static str,
	team: Option<Team>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Team {
	lead: Option<&'static str>,
}

fn users() -> Vec<User> {
	vec![
		User {
			id: 1,
			name: "ada",
			team: Some(Team { lead: Some("grace") }),
		},
		User {
			id: 2,
			name: "bob",
			team: Some(Team { lead: None }),
		},
		User {
			id: 3,
			name: "cy",
			team: None,
		},
	]
}

#[test]
fn parse_then_single_lookup_skips_bad_rows() {
	init_tracing();
	let mut rejected = Vec::new();
	let id = ["7", "oops", "12", "", "7x"]
		.into_iter()
		.map(str::parse::<u32>)
		.attempt_catch(|err: ParseIntError| rejected.push(err.to_string()))
		.single_or_throw(predicate!(|id: &u32| *id > 10));
	assert_eq!(id, Ok(12));
	assert_eq!(rejected.len(), 3);
}

#[test]
fn ambiguity_after_recovery_is_still_reported() {
	init_tracing();
	let err = ["1", "x", "1"]
		.into_iter()
		.map(str::parse::<u32>)
		.attempt_catch(drop)
		.single_or(Predicate::new("(x == 1)", |x: &u32| *x == 1), 0)
		.unwrap_err();
	assert_eq!(err.to_string(), "More than one match found for (x == 1).");
}

#[test]
fn selective_catch_leaves_other_errors_for_the_lookup() {
	init_tracing();
	#[derive(Debug, Clone, PartialEq, Eq)]
	enum Row {
		Skipped,
		Corrupt,
	}

	let rows = vec![Err(Row::Skipped), Ok(4), Err(Row::Corrupt), Ok(5)];
	let first_failure = rows
		.into_iter()
		.attempt_catch_where(|row| *row == Row::Skipped, drop)
		.first_element(|row| row.is_err());
	assert_eq!(first_failure, Element::present(Err(Row::Corrupt)));
}

#[test]
fn access_chain_guards_lookup_input() {
	init_tracing();
	let lead = AccessChain::root("user")
		.then("team", |u: &User| u.team.as_ref())
		.then("lead", |t: &Team| t.lead.as_ref());

	let mut nulls = Vec::new();
	let users = users();
	let valid: Vec<&User> = users
		.iter()
		.filter(|u| lead.check(u, |path| nulls.push(format!("{}: {path}", u.name))))
		.collect();
	assert_eq!(valid.len(), 1);
	assert_eq!(nulls, ["bob: user.team.lead", "cy: user.team"]);

	let grace = valid.single_or_throw(Predicate::always()).map(|u| lead.get(u));
	assert_eq!(grace, Ok(Ok(&"grace")));
}

#[test]
fn access_chain_find_feeds_element_defaults() {
	let lead = AccessChain::root("user")
		.then("team", |u: &User| u.team.as_ref())
		.then("lead", |t: &Team| t.lead.as_ref());
	let names: Vec<&str> = users().iter().map(|u| *lead.find(u).value_or(&"nobody")).collect();
	assert_eq!(names, ["grace", "nobody", "nobody"]);
}

#[rstest]
#[case(&[], Cardinality::None)]
#[case(&[2], Cardinality::One)]
#[case(&[1, 3, 2], Cardinality::One)]
#[case(&[2, 2], Cardinality::Multiple)]
fn query_and_sequence_agree(#[case] items: &[i32], #[case] expected: Cardinality) {
	let source: VecSource<i32> = items.iter().copied().collect();
	let from_query = source
		.query()
		.single_element(Predicate::new("(x == 2)", |x: &i32| *x == 2));
	let from_sequence = items.iter().copied().single_element(|x| *x == 2);
	assert_eq!(from_query.map(|r| r.cardinality()), Ok(expected));
	assert_eq!(from_sequence.cardinality(), expected);
}

#[test]
fn empty_source_scenarios() {
	init_tracing();
	#[derive(Debug, PartialEq, Eq)]
	struct Custom;

	let empty = Vec::<i32>::new();
	assert_eq!(empty.clone().first_or_throw_with(|_| true, || Custom), Err(Custom));
	let err = empty.single_or_throw(Predicate::always()).unwrap_err();
	assert_eq!(err.to_string(), "No match found for true.");
}

#[test]
fn two_match_throw_on_multiple_pulls_exactly_two() {
	let pulled = Cell::new(0);
	let raised = Cell::new(0);
	let result = [1, 2, 3]
		.into_iter()
		.inspect(|_| pulled.set(pulled.get() + 1))
		.single_element_or_throw_on_multiple(
			|_| true,
			|| {
				raised.set(raised.get() + 1);
				"ambiguous"
			},
		);
	assert_eq!(result, Err("ambiguous"));
	assert_eq!((pulled.get(), raised.get()), (2, 1));
}

#[test]
fn missing_supplier_only_fails_when_needed() {
	let none = None::<fn() -> i32>;
	assert_eq!(SingleElementResult::one(3).value_or_supplier(none), Ok(3));
	assert_eq!(
		vec![9].single_or_supplier(Predicate::new("(x == 1)", |x: &i32| *x == 1), none),
		Err(LookupError::Element(ElementError::MissingArgument("default_supplier")))
	);
}

#[test]
fn query_source_lookup_over_records() {
	init_tracing();
	let source: VecSource<User> = users().into_iter().collect();
	let bob = source
		.query()
		.filter(predicate!(|u: &User| u.team.is_some()))
		.first_or_throw(predicate!(|u: &User| u.name.starts_with('b')));
	assert_eq!(bob.map(|u| u.id), Ok(2));

	let err = source
		.query()
		.single_or_throw(predicate!(|u: &User| u.id > 1))
		.unwrap_err();
	assert_eq!(err.to_string(), "More than one match found for u.id > 1.");
}
