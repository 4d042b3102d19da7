//! A thin CLI front-end for inferring the type of a function applied to some arguments.

use std::path::PathBuf;
use viskell_env::Env;
use viskell_exp::{ExpIdx, Exps, Typed};
use viskell_types::{St, parse, scope::TypeScope};

fn usage() {
  let current_exe_name = std::env::current_exe()
    .ok()
    .and_then(|x| Some(x.file_name()?.to_str()?.to_owned()))
    .unwrap_or_else(|| "<unknown>".to_owned());
  println!("usage:");
  println!("  {current_exe_name} [options] <function> [<arg>...]");
  let rest_of_usage = r"
options:
  -h, --help
    show this help
  --catalog <path>
    load classes and functions from this catalog file instead of the prelude
  --context
    show constraints as a context, like `Num a => a -> a`, instead of inline
  --list
    list every function in the catalog with its signature

arguments:
  <function>
    the name of a function in the catalog
  <arg>
    an argument to apply the function to. one of:
    - `<type>=<text>`, a literal with the type, like `Int=42` or `[Bool]=[True]`
    - `_`, a hole
    - the name of another function in the catalog
";
  print!("{rest_of_usage}");
}

enum Arg<'a> {
  Hole,
  Value(&'a str, &'a str),
  Function(&'a str),
}

impl<'a> Arg<'a> {
  fn new(s: &'a str) -> Self {
    if s == "_" {
      return Arg::Hole;
    }
    // the type may contain `=>` but never a bare `=`.
    let bs = s.as_bytes();
    let eq = bs.iter().enumerate().position(|(i, &b)| b == b'=' && bs.get(i + 1) != Some(&b'>'));
    match eq {
      Some(i) => Arg::Value(&s[..i], &s[i + 1..]),
      None => Arg::Function(s),
    }
  }
}

fn run() -> usize {
  match env_logger::try_init_from_env(env_logger::Env::default().default_filter_or("error")) {
    Ok(()) => {}
    Err(e) => {
      println!("could not start env logger: {e}");
      return 1;
    }
  }
  let mut args = pico_args::Arguments::from_env();
  if args.contains(["-h", "--help"]) {
    usage();
    return 0;
  }
  let style = if args.contains("--context") {
    config::DisplayStyle::Context
  } else {
    config::DisplayStyle::Inline
  };
  let list = args.contains("--list");
  let catalog: Option<PathBuf> = match args.opt_value_from_str("--catalog") {
    Ok(x) => x,
    Err(e) => {
      println!("error: {e}");
      return 1;
    }
  };
  let mut free = Vec::<String>::new();
  for arg in args.finish() {
    match arg.into_string() {
      Ok(x) => free.push(x),
      Err(arg) => {
        println!("error: invalid UTF-8 in argument: {}", arg.to_string_lossy());
        return 1;
      }
    }
  }
  let mut st = St::default();
  let env = match load_env(&mut st, catalog) {
    Ok(x) => x,
    Err(e) => {
      println!("error: {e}");
      return 1;
    }
  };
  if list {
    for info in env.sorted() {
      println!("{} :: {}", info.name, info.signature.display(&st, style));
    }
    return 0;
  }
  let Some((function, rest)) = free.split_first() else {
    usage();
    return 1;
  };
  let mut exps = Exps::default();
  let exp = match build(&mut st, &env, &mut exps, function, rest) {
    Ok(x) => x,
    Err(e) => {
      println!("error: {e}");
      return 1;
    }
  };
  println!("{}", exps.to_haskell(&st, exp));
  match Typed::new(&exps).infer(&mut st, exp) {
    Ok(ty) => {
      println!("  :: {}", ty.display(&st, style));
      0
    }
    Err(e) => {
      println!("error: {}", e.display(&st, &exps));
      1
    }
  }
}

fn load_env(st: &mut St, catalog: Option<PathBuf>) -> Result<Env, String> {
  match catalog {
    None => Env::prelude(st).map_err(|e| e.to_string()),
    Some(path) => {
      let contents = std::fs::read_to_string(&path)
        .map_err(|e| format!("couldn't read {}: {e}", path.display()))?;
      let mut env = Env::default();
      viskell_env::load(st, &mut env, &contents)
        .map_err(|e| format!("{}: {e}", path.display()))?;
      Ok(env)
    }
  }
}

fn build(
  st: &mut St,
  env: &Env,
  exps: &mut Exps,
  function: &str,
  args: &[String],
) -> Result<ExpIdx, String> {
  let mut ret = exps.fun_var(env, function).map_err(|e| e.to_string())?;
  for arg in args {
    let arg = match Arg::new(arg) {
      Arg::Hole => exps.hole(),
      Arg::Value(ty, text) => {
        let ty = parse::get(st, &mut TypeScope::new(), ty)
          .map_err(|e| format!("invalid type `{ty}`: {e}"))?;
        exps.value(ty, text)
      }
      Arg::Function(name) => exps.fun_var(env, name).map_err(|e| e.to_string())?,
    };
    ret = exps.apply(ret, arg);
  }
  Ok(ret)
}

fn main() {
  if run() != 0 {
    std::process::exit(1)
  }
}
