use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use rgb::RGB8;
use pointillism::{ColorRange, RGBColor, Scheme, SchemeSet};

type Err = Box<dyn Error>;

fn css_string(c: RGB8) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

fn table_of_colors(fh: &mut impl Write, colors: &[(String, RGB8)],
                   width: u32, comment: &str) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for (title, c) in colors {
        writeln!(fh, "  <td title=\"{title}\" style=\"width: {width}px; \
                      height: 30px; background-color: {}\"></td>",
                css_string(*c))?;
    }
    writeln!(fh, "<td rowspan=\"2\" style=\"padding-left: 7px\">\
                  {comment}</td></tr><tr>")?;
    for (_, c) in colors {
        let c = c.to_gray();
        writeln!(fh, "  <td style=\"width: {width}px; height: 12px; \
                      background-color: {}\"></td>",
                 css_string(c))?;
    }
    writeln!(fh, "</tr></table><br/>")?;
    Ok(())
}

fn legend(fh: &mut impl Write, range: impl ColorRange<RGB8>, n: usize,
          width: u32, comment: &str) -> Result<(), Err> {
    let colors: Vec<_> = range.range(0., 1., n)
        .map(|(t, c)| (format!("{t:.3}"), c))
        .collect();
    table_of_colors(fh, &colors, width, comment)
}

fn main() -> Result<(), Err> {
    let mut fh = BufWriter::new(File::create("swatches.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>pointillism: {}</title>\n\
                  </head>\n\
                  <body>",
             env::args().next().unwrap_or_default())?;

    let schemes = SchemeSet::builtin();
    for name in schemes.names() {
        writeln!(fh, "<h3>{name}</h3>")?;
        match schemes.get::<RGB8>(name)? {
            Scheme::Categorical(c) => {
                let mut colors: Vec<_> = c.keys()
                    .map(|k| (k.to_string(), c.color(k)))
                    .collect();
                colors.push(("default".to_string(), c.default_color()));
                let keys: Vec<_> = colors.iter()
                    .map(|(k, _)| k.as_str()).collect();
                table_of_colors(&mut fh, &colors, 40, &keys.join(", "))?;
            }
            Scheme::Density(d) => {
                let colors: Vec<_> = d.ranges().iter()
                    .flat_map(|r| [(format!("≤ {}", r.max), r.start),
                                   (format!("{}", r.max), r.end)])
                    .collect();
                table_of_colors(&mut fh, &colors, 20, "range bounds")?;
                legend(&mut fh, d, 10, 43, "")?;
                legend(&mut fh, d, 30, 13, "")?;
                legend(&mut fh, d, 400, 1, "")?;
            }
        }
    }

    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
