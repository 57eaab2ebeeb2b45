#[macro_use]
mod common;

#[cfg(test)]
mod _if {
    tests! {
        class_declaration_is_not_a_valid_then_branch is ERR
        "if (true) class Foo {}" => "Expect expression"
    }

    tests! {
        class_declaration_is_not_a_valid_else_branch is ERR
        "if (false) nil; else class Foo {}" => "Expect expression"
    }

    tests! {
        fun_declaration_is_not_a_valid_then_branch is ERR
        "if (true) fun f() {}" => "Expect expression"
    }

    tests! {
        fun_declaration_is_not_a_valid_else_branch is ERR
        "if (false) nil; else fun f() {}" => "Expect expression"
    }

    tests! {
        var_declaration_is_not_a_valid_then_branch is ERR
        "if (true) var x = 1;" => "Expect expression"
    }

    tests! {
        var_declaration_is_not_a_valid_else_branch is ERR
        "if (false) nil; else var x = 1;" => "Expect expression"
    }

    tests! {
        dangling_else_binds_to_the_nearest_if is OK
        r#"
            if (true) if (false) print "inner"; else print "dangling";
        "# => "dangling"
    }

    tests! {
        if_true_runs_the_then_branch is OK
        r#"
            if (true) print "then";
        "# => "then"
    }

    tests! {
        if_false_skips_the_then_branch is OK
        r#"
            if (false) print "then";
            print "after";
        "# => "after"
    }

    tests! {
        else_runs_when_condition_is_false is OK
        r#"
            if (false) print "then"; else print "else";
        "# => "else"
    }

    tests! {
        block_branches_introduce_their_own_scope is OK
        r#"
            var a = "outer";
            if (true) {
                var a = "inner";
                print a;
            }
            print a;
        "# => "inner", "outer"
    }

    tests! {
        only_false_and_nil_are_falsey is OK
        r#"
            if (false) print "false branch"; else print "false is falsey";
            if (nil) print "nil branch"; else print "nil is falsey";
            if (true) print "true is truthy";
            if (0) print "0 is truthy";
            if ("") print "empty string is truthy";
        "# => "false is falsey", "nil is falsey", "true is truthy", "0 is truthy", "empty string is truthy"
    }
}
