use crate::app::models::{FileSet, ProjectConfig};

/// Inputs shared by every fragment.
struct Recipe<'a> {
    config: &'a ProjectConfig,
    sources: &'a FileSet,
}

struct Fragment {
    name: &'static str,
    applies: fn(&ProjectConfig) -> bool,
    render: fn(&Recipe) -> String,
}

const FRAGMENTS: &[Fragment] = &[
    Fragment { name: "colors", applies: always, render: colors },
    Fragment { name: "variables", applies: always, render: variables },
    Fragment { name: "sources", applies: always, render: sources },
    Fragment { name: "archives", applies: any_library, render: archives },
    Fragment { name: "link", applies: always, render: link },
    Fragment { name: "compile", applies: always, render: compile },
    Fragment { name: "mlx", applies: ProjectConfig::uses_mlx, render: mlx_target },
    Fragment { name: "libft", applies: ProjectConfig::uses_libft, render: libft_target },
    Fragment { name: "clean", applies: always, render: clean },
    Fragment { name: "fclean", applies: always, render: fclean },
    Fragment { name: "re", applies: always, render: rebuild },
    Fragment { name: "phony", applies: always, render: phony },
    Fragment { name: "deps", applies: tracks_dependencies, render: include_deps },
];

/// Renders the full Makefile from the fragments that apply to `config`,
/// joined with a blank line between them. Identical inputs give identical output.
pub fn render(config: &ProjectConfig, sources: &FileSet) -> String {
    let recipe = Recipe { config, sources };
    FRAGMENTS
        .iter()
        .filter(|f| (f.applies)(config))
        .map(|f| (f.render)(&recipe))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Names of the fragments `render` would emit for `config`, in order.
pub fn fragment_names(config: &ProjectConfig) -> Vec<&'static str> {
    FRAGMENTS
        .iter()
        .filter(|f| (f.applies)(config))
        .map(|f| f.name)
        .collect()
}

fn always(_: &ProjectConfig) -> bool {
    true
}

fn any_library(config: &ProjectConfig) -> bool {
    config.uses_libft() || config.uses_mlx()
}

fn tracks_dependencies(config: &ProjectConfig) -> bool {
    config.track_dependencies
}

fn colors(_: &Recipe) -> String {
    String::from(
        "# Colors\n\
         GREEN = \\033[0;32m\n\
         YELLOW = \\033[0;33m\n\
         BLUE = \\033[0;34m\n\
         RED = \\033[0;31m\n\
         RESET = \\033[0m\n",
    )
}

fn variables(recipe: &Recipe) -> String {
    let mut out = format!(
        "NAME = {}\nCC = cc\nCFLAGS = -Wall -Wextra -Werror\n",
        recipe.config.name
    );
    if recipe.config.uses_mlx() {
        out.push_str("MLXFLAGS = -lmlx -lXext -lX11 -lm\n");
    }
    out
}

fn sources(recipe: &Recipe) -> String {
    let srcs = recipe.sources.paths().join(" ");
    let mut out = format!(
        "SRCS = {}\n\nOBJS_DIR = {}\nOBJS = $(SRCS:%.c=$(OBJS_DIR)/%.o)\n",
        srcs, recipe.config.objs_dir
    );
    if recipe.config.track_dependencies {
        out.push_str("\nDEPS = $(OBJS:.o=.d)\n");
    }
    out
}

fn archives(recipe: &Recipe) -> String {
    let mut out = String::new();
    if let Some(dir) = &recipe.config.libft {
        out.push_str(&format!("LIBFT = {}/libft.a\n", dir));
    }
    if let Some(dir) = &recipe.config.mlx {
        out.push_str(&format!("MLX = {}/libmlx.a\n", dir));
    }
    out
}

fn link(recipe: &Recipe) -> String {
    let config = recipe.config;

    let mut prerequisites = String::from("$(OBJS)");
    let mut libs = String::new();
    if let Some(dir) = &config.libft {
        prerequisites.push_str(" $(LIBFT)");
        libs.push_str(&format!("-L{} -lft ", dir));
    }
    if let Some(dir) = &config.mlx {
        prerequisites.push_str(" $(MLX)");
        libs.push_str(&format!("-L{} $(MLXFLAGS) ", dir));
    }

    format!(
        "all: $(NAME)\n\
         \n\
         $(NAME): {}\n\
         \t@echo -n \"$(YELLOW)Linking project... $(RESET)\"\n\
         \t@$(CC) $(CFLAGS) $(OBJS) {}-o $(NAME)\n\
         \t@echo \"$(GREEN)Done!$(RESET)\"\n",
        prerequisites, libs
    )
}

fn compile(recipe: &Recipe) -> String {
    let config = recipe.config;

    let mut flags = String::new();
    if config.track_dependencies {
        flags.push_str(" -MMD -MP");
    }
    flags.push_str(&format!(" -I./{}", config.include_dir));
    for dir in config.library_dirs() {
        flags.push_str(&format!(" -I{}", dir));
    }

    format!(
        "$(OBJS_DIR)/%.o: %.c\n\
         \t@mkdir -p $(@D)\n\
         \t@echo -n \"$(YELLOW)Compiling $<... $(RESET)\"\n\
         \t@$(CC) $(CFLAGS){} -c $< -o $@ \\\n\
         \t\t|| (echo \"$(RED)Failed!$(RESET)\" && exit 1)\n\
         \t@echo \"$(GREEN)Done!$(RESET)\"\n",
        flags
    )
}

fn library_target(variable: &str, label: &str, dir: &str) -> String {
    format!(
        "$({variable}):\n\
         \t@echo \"$(YELLOW)Compiling {label}...$(RESET)\"\n\
         \t@$(MAKE) -C {dir} > /dev/null\n\
         \t@echo \"$(GREEN){label} compilation successful!$(RESET)\"\n"
    )
}

fn mlx_target(recipe: &Recipe) -> String {
    recipe
        .config
        .mlx
        .as_deref()
        .map(|dir| library_target("MLX", "MLX", dir))
        .unwrap_or_default()
}

fn libft_target(recipe: &Recipe) -> String {
    recipe
        .config
        .libft
        .as_deref()
        .map(|dir| library_target("LIBFT", "libft", dir))
        .unwrap_or_default()
}

fn delegate(dir: &str, target: &str) -> String {
    format!("\t@$(MAKE) -C {} {} > /dev/null\n", dir, target)
}

fn clean(recipe: &Recipe) -> String {
    let mut out = String::from("clean:\n\t@echo -n \"$(YELLOW)Cleaning up... $(RESET)\"\n");
    for dir in recipe.config.library_dirs() {
        out.push_str(&delegate(&dir, "clean"));
    }
    out.push_str("\t@rm -rf $(OBJS_DIR)\n\t@echo \"$(GREEN)Done!$(RESET)\"\n");
    out
}

// MiniLibX ships no fclean target, so it only gets a plain clean here.
fn fclean(recipe: &Recipe) -> String {
    let mut out = String::from("fclean: clean\n\t@echo -n \"$(YELLOW)Full cleanup... $(RESET)\"\n");
    if let Some(dir) = &recipe.config.libft {
        out.push_str(&delegate(dir, "fclean"));
    }
    if let Some(dir) = &recipe.config.mlx {
        out.push_str(&delegate(dir, "clean"));
    }
    out.push_str("\t@rm -f $(NAME)\n\t@echo \"$(GREEN)Done!$(RESET)\"\n");
    out
}

fn rebuild(_: &Recipe) -> String {
    String::from("re: fclean all\n")
}

fn phony(_: &Recipe) -> String {
    String::from(".PHONY: all clean fclean re\n")
}

fn include_deps(_: &Recipe) -> String {
    String::from("-include $(DEPS)\n")
}
