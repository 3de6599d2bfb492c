use std::io::{self, BufRead, Write};

use super::person::PersonRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// [SortKey] is the column the report is ordered by. Every sort is stable,
/// so records with equal keys keep their roster order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Age(SortOrder),

    /// Female first.
    Gender,

    /// Plain string order of the city name.
    City,
}

impl SortKey {
    pub fn apply(&self, records: &mut [PersonRecord]) {
        use SortKey::*;
        match self {
            Age(SortOrder::Ascending) => records.sort_by_key(|r| r.age),
            Age(SortOrder::Descending) => records.sort_by(|a, b| b.age.cmp(&a.age)),
            Gender => records.sort_by_key(|r| r.gender),
            City => records.sort_by(|a, b| a.city.cmp(&b.city)),
        }
    }
}

/// Reads one trimmed answer. EOF counts as an empty answer.
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> io::Result<String> {
    write!(output, "{prompt}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Walks the user through choosing a [SortKey]. Returns `None` when no sort
/// was requested or the option was not recognised.
pub fn prompt_sort_key<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
) -> io::Result<Option<SortKey>> {
    writeln!(output, "\n是否需要对结果进行排序？")?;
    let choice = ask(&mut input, &mut output, "输入 Y 进行排序，或直接回车跳过：")?;
    if !choice.eq_ignore_ascii_case("y") {
        return Ok(None);
    }

    writeln!(output, "\n请选择排序方式：")?;
    writeln!(output, "1. 根据年龄排序")?;
    writeln!(output, "2. 根据性别排序（女在前）")?;
    writeln!(output, "3. 根据城市排序")?;
    let option = ask(&mut input, &mut output, "请输入选项编号（1/2/3）：")?;

    let key = match option.as_str() {
        "1" => {
            let order = ask(
                &mut input,
                &mut output,
                "年龄排序方式：输入 A 从小到大，输入 D 从大到小（默认 A）：",
            )?;
            if order.eq_ignore_ascii_case("d") {
                SortKey::Age(SortOrder::Descending)
            } else {
                SortKey::Age(SortOrder::Ascending)
            }
        }
        "2" => SortKey::Gender,
        "3" => SortKey::City,
        _ => {
            writeln!(output, "无效选项，跳过排序。")?;
            return Ok(None);
        }
    };
    Ok(Some(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{common::Gender, identity::IdNumber};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn record(name: &str, age: u32, gender: Gender, city: &str) -> PersonRecord {
        PersonRecord {
            name: name.to_string(),
            id_number: IdNumber::parse("11010119900307803X").unwrap(),
            birth_date: NaiveDate::from_ymd_opt(1990, 3, 7).unwrap(),
            age,
            gender,
            city: city.to_string(),
        }
    }

    fn sample() -> Vec<PersonRecord> {
        vec![
            record("a", 30, Gender::Male, "深圳市"),
            record("b", 25, Gender::Female, "北京市"),
            record("c", 30, Gender::Female, "上海市"),
            record("d", 25, Gender::Male, "北京市"),
        ]
    }

    fn names(records: &[PersonRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    fn prompt(answers: &str) -> (Option<SortKey>, String) {
        let mut output = Vec::new();
        let key = prompt_sort_key(answers.as_bytes(), &mut output).unwrap();
        (key, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_sort_keys() {
        let cases = [
            (SortKey::Age(SortOrder::Ascending), vec!["b", "d", "a", "c"]),
            (SortKey::Age(SortOrder::Descending), vec!["a", "c", "b", "d"]),
            (SortKey::Gender, vec!["b", "c", "a", "d"]),
            // 上 < 北 < 深 by code point
            (SortKey::City, vec!["c", "b", "d", "a"]),
        ];
        for (key, expected) in cases {
            let mut records = sample();
            key.apply(&mut records);
            assert_eq!(names(&records), expected, "{key:?}");
        }
    }

    #[test]
    fn test_prompt_skips_without_yes() {
        for answers in ["", "\n", "n\n", "yes\n"] {
            let (key, output) = prompt(answers);
            assert_eq!(key, None, "answers {answers:?}");
            assert!(!output.contains("请选择排序方式"));
        }
    }

    #[test]
    fn test_prompt_choices() {
        let cases = [
            ("y\n1\n\n", Some(SortKey::Age(SortOrder::Ascending))),
            ("Y\n1\na\n", Some(SortKey::Age(SortOrder::Ascending))),
            (" y \n 1 \nd\n", Some(SortKey::Age(SortOrder::Descending))),
            ("y\n1\nD", Some(SortKey::Age(SortOrder::Descending))),
            ("y\n1", Some(SortKey::Age(SortOrder::Ascending))),
            ("y\n2\n", Some(SortKey::Gender)),
            ("y\n3\n", Some(SortKey::City)),
        ];
        for (answers, expected) in cases {
            assert_eq!(prompt(answers).0, expected, "answers {answers:?}");
        }
    }

    #[test]
    fn test_prompt_invalid_option() {
        let (key, output) = prompt("y\n4\n");
        assert_eq!(key, None);
        assert!(output.contains("无效选项，跳过排序。"));
    }

    proptest! {
        #[test]
        fn test_sorts_are_stable(ages in prop::collection::vec(0u32..5, 0..40)) {
            let records: Vec<_> = ages
                .iter()
                .enumerate()
                .map(|(i, age)| record(&i.to_string(), *age, Gender::from_digit(*age as u8), "北京市"))
                .collect();

            for key in [
                SortKey::Age(SortOrder::Ascending),
                SortKey::Age(SortOrder::Descending),
                SortKey::Gender,
                SortKey::City,
            ] {
                let mut sorted = records.clone();
                key.apply(&mut sorted);
                prop_assert_eq!(sorted.len(), records.len());
                for pair in sorted.windows(2) {
                    let (a, b) = (&pair[0], &pair[1]);
                    let equal_keys = match key {
                        SortKey::Age(SortOrder::Ascending) => {
                            prop_assert!(a.age <= b.age);
                            a.age == b.age
                        }
                        SortKey::Age(SortOrder::Descending) => {
                            prop_assert!(a.age >= b.age);
                            a.age == b.age
                        }
                        SortKey::Gender => {
                            prop_assert!(a.gender <= b.gender);
                            a.gender == b.gender
                        }
                        SortKey::City => true,
                    };
                    if equal_keys {
                        let index = |r: &PersonRecord| r.name.parse::<usize>().unwrap();
                        prop_assert!(index(a) < index(b));
                    }
                }
            }
        }
    }
}
