pub const TEMPLATE_HTML_WITH_SOURCED_SCRIPT: &str = r#"
<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <title>Webpack App</title>
    <script src="analytics.js"></script>
  </head>
  <body>
    <script src="app.js"></script>
  </body>
</html>
"#;

pub const TEMPLATE_HTML_WITH_INLINE_SCRIPT: &str = r#"
<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <title>Webpack App</title>
    <script src="analytics.js"></script>
  </head>
  <body>
    <script src="app.js"></script>
    <script>
        console.log("Hello World");
    </script>
  </body>
</html>
"#;

pub const TEMPLATE_HTML_WITH_INLINE_STYLE: &str = r#"
<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <title>Webpack App</title>
    <style>body { margin: 0; }</style>
    <script src="analytics.js"></script>
  </head>
  <body>
    <script src="app.js"></script>
    <script>
        console.log("Hello World");
    </script>
  </body>
</html>
"#;
