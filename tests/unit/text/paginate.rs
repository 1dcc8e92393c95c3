use super::*;

fn per_char(px: f32) -> impl FnMut(&str) -> f32 {
    move |s: &str| s.chars().count() as f32 * px
}

fn all_lines(pages: &[Page]) -> Vec<String> {
    pages.iter().flat_map(|p| p.lines.iter().cloned()).collect()
}

#[test]
fn tokenizer_splits_words_space_runs_and_punctuation() {
    let text = "ab  cd.ef!";
    let ends: Vec<(usize, bool)> = Tokens::new(text).map(|t| (t.end, t.breakable)).collect();
    assert_eq!(
        ends,
        vec![
            (2, false),
            (4, true),
            (6, false),
            (7, true),
            (9, false),
            (10, true)
        ]
    );
}

#[test]
fn tokenizer_handles_fullwidth_punctuation() {
    let text = "좋아요。최고！";
    let tokens: Vec<&str> = {
        let mut start = 0;
        Tokens::new(text)
            .map(|t| {
                let s = &text[start..t.end];
                start = t.end;
                s
            })
            .collect()
    };
    assert_eq!(tokens, vec!["좋아요", "。", "최고", "！"]);
}

#[test]
fn korean_text_wraps_at_whitespace() {
    let pages = paginate("가나다 라마바 사아자", 5, 80.0, &mut per_char(10.0)).unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].lines, vec!["가나다 라마바", "사아자"]);
}

#[test]
fn blank_text_has_no_pages() {
    assert!(paginate("", 3, 100.0, &mut per_char(10.0)).unwrap().is_empty());
    assert!(paginate(" \r\n\n \t", 3, 100.0, &mut per_char(10.0))
        .unwrap()
        .is_empty());
}

#[test]
fn author_newlines_are_hard_breaks() {
    let pages = paginate("one\r\ntwo\n\n\nthree\rfour", 10, 1000.0, &mut per_char(10.0)).unwrap();
    assert_eq!(all_lines(&pages), vec!["one", "two", "three", "four"]);
}

#[test]
fn punctuation_is_a_break_opportunity() {
    // "맛있어요.정말" does not fit in 60px; the period is the only break.
    let pages = paginate("맛있어요.정말", 5, 60.0, &mut per_char(10.0)).unwrap();
    assert_eq!(all_lines(&pages), vec!["맛있어요.", "정말"]);
}

#[test]
fn unbreakable_run_is_cut_between_characters() {
    let pages = paginate("abcdefghij", 10, 30.0, &mut per_char(10.0)).unwrap();
    assert_eq!(all_lines(&pages), vec!["abc", "def", "ghi", "j"]);
}

#[test]
fn hard_cut_keeps_following_words() {
    let pages = paginate("abcdefgh ij kl", 10, 40.0, &mut per_char(10.0)).unwrap();
    let lines = all_lines(&pages);
    assert_eq!(lines, vec!["abcd", "efgh", "ij", "kl"]);
}

#[test]
fn single_overwide_character_terminates() {
    let mut measure = |s: &str| if s.contains('W') { 500.0 } else { s.chars().count() as f32 };
    let pages = paginate("W", 3, 100.0, &mut measure).unwrap();
    assert_eq!(all_lines(&pages), vec!["W"]);

    let pages = paginate("ab W cd", 3, 100.0, &mut measure).unwrap();
    assert_eq!(all_lines(&pages), vec!["ab", "W", "cd"]);
}

#[test]
fn wrapping_resumes_after_an_overwide_character() {
    let mut measure = |s: &str| {
        s.chars()
            .map(|c| if c == '\u{1F389}' { 500.0 } else { 10.0 })
            .sum::<f32>()
    };
    let text = format!("\u{1F389} {}", "word ".repeat(60));
    let pages = paginate(&text, 100, 100.0, &mut measure).unwrap();
    let lines = all_lines(&pages);

    assert_eq!(lines[0], "\u{1F389}");
    assert_eq!(lines.len(), 31);
    for line in &lines[1..] {
        assert_eq!(line, "word word");
        assert!(measure(line.as_str()) <= 100.0);
    }
}

#[test]
fn ten_thousand_character_token_terminates_without_loss() {
    let token = "가".repeat(10_000);
    let pages = paginate(&token, 4, 1000.0, &mut per_char(20.0)).unwrap();
    let lines = all_lines(&pages);
    assert_eq!(lines.len(), 200);
    assert!(lines.iter().all(|l| l.chars().count() == 50));
    assert_eq!(lines.concat(), token);
    assert_eq!(pages.len(), 50);
}

#[test]
fn pages_hold_at_most_max_lines_and_drop_nothing() {
    let text = (0..23)
        .map(|i| format!("word{i}"))
        .collect::<Vec<_>>()
        .join("\n");
    let pages = paginate(&text, 4, 1000.0, &mut per_char(10.0)).unwrap();
    assert_eq!(pages.len(), 6);
    assert!(pages.iter().all(|p| !p.is_empty() && p.len() <= 4));
    assert_eq!(pages.last().map(Page::len), Some(3));
    let expected: Vec<String> = (0..23).map(|i| format!("word{i}")).collect();
    assert_eq!(all_lines(&pages), expected);
}

#[test]
fn lines_never_exceed_width_when_characters_fit() {
    let text = "오늘 방문한 가게는 정말 친절했고, 음식도 맛있었습니다! 다음에 또 올게요. 강력 추천합니다.";
    let pages = paginate(text, 3, 120.0, &mut per_char(12.0)).unwrap();
    for line in all_lines(&pages) {
        assert!(line.chars().count() as f32 * 12.0 <= 120.0, "{line}");
    }
}

#[test]
fn pagination_is_deterministic() {
    let text = "가나다 라마바 사아자 차카타 파하\n둘째 문단입니다. 길게 씁니다!";
    let a = paginate(text, 2, 70.0, &mut per_char(10.0)).unwrap();
    let b = paginate(text, 2, 70.0, &mut per_char(10.0)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn rejects_degenerate_limits() {
    assert!(paginate("x", 0, 100.0, &mut per_char(10.0)).is_err());
    assert!(paginate("x", 1, f32::NAN, &mut per_char(10.0)).is_err());
    assert!(paginate("x", 1, 0.0, &mut per_char(10.0)).is_err());
}

#[test]
fn measurement_errors_propagate() {
    struct Failing;
    impl TextMeasure for Failing {
        fn measure(&mut self, _text: &str) -> CardResult<f32> {
            Err(CardError::render("no font"))
        }
    }
    assert!(paginate("hello", 1, 100.0, &mut Failing).is_err());
}
