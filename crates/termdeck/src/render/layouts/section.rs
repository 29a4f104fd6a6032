use crate::render::Viewport;
use crate::render::layouts::center;
use crate::render::measure::content_width;

const RULE: char = '━';
const ORNAMENT: &str = "┫ ◆ ┣";
const ORNAMENT_WIDTH: i64 = 5;

/// A section title framed above and below by an ornamented rule.
pub fn render(title: &str, viewport: Viewport) -> String {
    center::render(&banner(title), viewport)
}

/// Rule, blank, title, blank, rule. The rule tracks the title width.
pub fn banner(title: &str) -> String {
    let title = title.trim_end_matches('\n');
    let rule = rule(content_width(title));
    format!("{rule}\n\n{title}\n\n{rule}\n")
}

fn rule(width: usize) -> String {
    let width = width as i64;
    let right = (width - ORNAMENT_WIDTH).div_euclid(2).max(1);
    let left = (width - ORNAMENT_WIDTH - right).max(1);

    let mut rule = String::new();
    rule.extend(std::iter::repeat_n(RULE, left as usize));
    rule.push_str(ORNAMENT);
    rule.extend(std::iter::repeat_n(RULE, right as usize));
    rule
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::measure::visible_length;

    #[test]
    fn test_ornament_is_five_wide() {
        assert_eq!(visible_length(ORNAMENT) as i64, ORNAMENT_WIDTH);
    }

    #[test]
    fn test_short_title_gets_one_rule_char_each_side() {
        assert_eq!(rule(5), "━┫ ◆ ┣━");
        assert_eq!(rule(1), "━┫ ◆ ┣━");
        assert_eq!(rule(0), "━┫ ◆ ┣━");
    }

    #[test]
    fn test_rule_tracks_width() {
        // width 20: right = 7, left = 8
        let r = rule(20);
        assert_eq!(visible_length(&r), 20);
        assert!(r.starts_with(&"━".repeat(8)));
        assert!(r.ends_with(&format!("┣{}", "━".repeat(7))));
    }

    #[test]
    fn test_odd_slack_puts_extra_on_left() {
        // width 10: right = max(1, 5/2) = 2, left = 3
        assert_eq!(rule(10), "━━━┫ ◆ ┣━━");
    }

    #[test]
    fn test_banner_layout() {
        assert_eq!(banner("Intro\n"), "━┫ ◆ ┣━\n\nIntro\n\n━┫ ◆ ┣━\n");
    }

    #[test]
    fn test_rendered_through_center() {
        let out = render("Intro", Viewport::new(24, 80));
        let expected = center::render("━┫ ◆ ┣━\n\nIntro\n\n━┫ ◆ ┣━\n", Viewport::new(24, 80));
        assert_eq!(out, expected);
        // 5 lines -> row 1 + 19/2 = 10; rule width 7 -> col 37; title col 38
        assert!(out.starts_with("\x1b[10;37H━┫ ◆ ┣━"), "{out:?}");
        assert!(out.contains("\x1b[12;38HIntro"), "{out:?}");
    }
}
