const SHORT: &str = "\
termdeck deck format, quick reference

  @center            lines centered one by one
  @block             text centered as one block, alignment kept
  @code: <language>  highlighted source, centered as a block
  @section: <title>  title between two ornamented rules
  @image: <path>     picture as terminal background (iTerm2)

  Keys: space n l k PgDn next | b p h j PgUp previous | ^ first | $ last | q quit
";

const FULL: &str = r#"termdeck deck format
====================

A deck is a plain text file. Each slide starts with a directive in the first
column of a line and runs until the next directive:

    @<format>
    @<format>: <value>

Everything before the first directive must be blank or a `#` comment.

Slide bodies
------------

Blank lines around a body are dropped. The indentation shared by all body
lines is removed, so bodies may be indented freely. A line starting with `@`
in the first column always opens a new slide; indent it to keep it as text.

Formats
-------

@center
    Every line is centered horizontally on its own; the whole slide is
    centered vertically.

@block
    The body is centered as one rectangle. Lines keep their relative
    indentation.

@code: <language>
    The body is syntax highlighted and laid out like @block. The language is
    a name or file extension (rust, rb, python, sh, ...). An unknown language
    stops the presentation with an error.

@section: <title>
    A title framed above and below by a rule that follows the title width.
    The title may also be given as the body.

@image: <path>
    The picture becomes the terminal background (iTerm2 only). Relative
    paths are resolved from the deck's directory. The path may also be given
    as the body.

Example
-------

    # my talk
    @section: Welcome

    @center
        Hello!

    @code: rust
        fn main() {
            println!("hi");
        }

Navigation
----------

    space  n  l  k  Page Down    next slide
    b  p  h  j  Page Up          previous slide
    ^                            first slide
    $                            last slide
    q                            quit
    any other key                redraw the current slide

The deck file is checked before every slide is drawn and reloaded when it
has changed on disk.
"#;

pub fn run(short: bool) {
    if short {
        print!("{SHORT}");
    } else {
        print!("{FULL}");
    }
}
