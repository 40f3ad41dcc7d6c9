use fob_docs::{
    DocsExtractor, Project, generators::html::render_site, generators::json::render_json,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let source = r#"
        /**
         * Subtract the second value from the first.
         * @param {number} a minuend
         * @param {number} b subtrahend
         * @returns {number} difference
         */
        export function subtract(a: number, b: number): number {
            return a - b;
        }
    "#;

    let module = DocsExtractor::default().extract_from_source("src/math.ts", source)?;

    let mut project = Project::new("math");
    project.add_module(module);

    for page in render_site(&project)? {
        println!("{}: {} bytes", page.path.display(), page.contents.len());
    }

    let json = render_json(&project)?;
    println!("JSON output:\n{json}");

    Ok(())
}
